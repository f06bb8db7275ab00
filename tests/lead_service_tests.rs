use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use leadgate::config::TrackingConfig;
use leadgate::errors::LeadgateError;
use leadgate::repository::{
    ConversionRecord, DuplicateField, Lead, LeadFilter, LeadInsertOutcome, LeadPage,
    LeadRepository, LeadStats, NewConversion, NewLead, SourceCount,
};
use leadgate::services::{CapiForwarder, LeadService, SubmitLeadOutcome, SubmitLeadRequest};

// In-memory repository with the same uniqueness semantics as the store
#[derive(Default)]
struct MockRepository {
    leads: Mutex<HashMap<String, Lead>>,
    conversions: Mutex<Vec<ConversionRecord>>,
    fail_inserts: Mutex<bool>,
}

impl MockRepository {
    fn set_fail_inserts(&self, fail: bool) {
        *self.fail_inserts.lock().unwrap() = fail;
    }

    fn lead_count(&self) -> usize {
        self.leads.lock().unwrap().len()
    }

    fn conversion_count(&self) -> usize {
        self.conversions.lock().unwrap().len()
    }

    fn first_lead(&self) -> Lead {
        self.leads.lock().unwrap().values().next().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LeadRepository for MockRepository {
    async fn insert_lead(&self, new_lead: NewLead) -> leadgate::errors::Result<LeadInsertOutcome> {
        if *self.fail_inserts.lock().unwrap() {
            return Err(LeadgateError::database_operation("Mock insert error"));
        }

        let mut leads = self.leads.lock().unwrap();
        if leads.values().any(|l| l.email == new_lead.email) {
            return Ok(LeadInsertOutcome::Duplicate(DuplicateField::Email));
        }
        if leads.values().any(|l| l.phone == new_lead.phone) {
            return Ok(LeadInsertOutcome::Duplicate(DuplicateField::Phone));
        }

        let lead = Lead {
            id: uuid::Uuid::new_v4().to_string(),
            name: new_lead.name,
            email: new_lead.email,
            phone: new_lead.phone,
            message: new_lead.message,
            source: new_lead.source,
            medium: new_lead.medium,
            campaign: new_lead.campaign,
            ip_address: new_lead.ip_address,
            user_agent: new_lead.user_agent,
            created_at: chrono::Utc::now(),
        };
        leads.insert(lead.id.clone(), lead.clone());
        Ok(LeadInsertOutcome::Inserted(lead))
    }

    async fn insert_conversion(
        &self,
        new_conversion: NewConversion,
    ) -> leadgate::errors::Result<ConversionRecord> {
        let record = ConversionRecord {
            id: uuid::Uuid::new_v4().to_string(),
            lead_id: new_conversion.lead_id,
            event_name: new_conversion.event_name,
            event_id: new_conversion.event_id,
            value: new_conversion.value,
            currency: new_conversion.currency,
            fbc: new_conversion.fbc,
            gclid: new_conversion.gclid,
            created_at: chrono::Utc::now(),
        };
        self.conversions.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn get_lead(&self, id: &str) -> leadgate::errors::Result<Option<Lead>> {
        Ok(self.leads.lock().unwrap().get(id).cloned())
    }

    async fn list_leads(
        &self,
        _filter: &LeadFilter,
        _page: u64,
        _page_size: u64,
    ) -> leadgate::errors::Result<LeadPage> {
        let leads: Vec<Lead> = self.leads.lock().unwrap().values().cloned().collect();
        let total = leads.len() as u64;
        Ok(LeadPage { leads, total })
    }

    async fn list_all_leads(&self, _filter: &LeadFilter) -> leadgate::errors::Result<Vec<Lead>> {
        Ok(self.leads.lock().unwrap().values().cloned().collect())
    }

    async fn conversions_for_lead(
        &self,
        lead_id: &str,
    ) -> leadgate::errors::Result<Vec<ConversionRecord>> {
        Ok(self
            .conversions
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.lead_id == lead_id)
            .cloned()
            .collect())
    }

    async fn stats(&self) -> leadgate::errors::Result<LeadStats> {
        let total = self.leads.lock().unwrap().len() as u64;
        Ok(LeadStats {
            total,
            by_source: Vec::<SourceCount>::new(),
        })
    }

    async fn ping(&self) -> leadgate::errors::Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn make_service(repository: Arc<MockRepository>) -> LeadService {
    // Tracking credentials absent: the forwarder short-circuits without
    // any network traffic, which is what these tests rely on
    let tracking = TrackingConfig::default();
    let forwarder = Arc::new(CapiForwarder::new(tracking.clone()));
    LeadService::new(repository, forwarder, tracking)
}

fn valid_request() -> SubmitLeadRequest {
    SubmitLeadRequest {
        name: "Maria Silva".to_string(),
        email: "maria@example.com".to_string(),
        phone: "+55 (51) 99853-5411".to_string(),
        ip_address: "203.0.113.7".to_string(),
        user_agent: "Mozilla/5.0".to_string(),
        ..SubmitLeadRequest::default()
    }
}

#[tokio::test]
async fn test_submit_valid_lead_creates_row_and_conversion() {
    let repository = Arc::new(MockRepository::default());
    let service = make_service(repository.clone());

    let outcome = service.submit(valid_request()).await.unwrap();
    assert!(matches!(outcome, SubmitLeadOutcome::Created));
    assert_eq!(repository.lead_count(), 1);
    assert_eq!(repository.conversion_count(), 1);

    let lead = repository.first_lead();
    // Phone stored in canonical digits-only form
    assert_eq!(lead.phone, "5551998535411");
    assert_eq!(lead.ip_address.as_deref(), Some("203.0.113.7"));
}

#[tokio::test]
async fn test_submit_without_attribution_defaults_to_organic() {
    let repository = Arc::new(MockRepository::default());
    let service = make_service(repository.clone());

    service.submit(valid_request()).await.unwrap();

    let lead = repository.first_lead();
    assert_eq!(lead.source.as_deref(), Some("organico"));
}

#[tokio::test]
async fn test_submit_with_click_id_keeps_source_unattributed() {
    let repository = Arc::new(MockRepository::default());
    let service = make_service(repository.clone());

    let request = SubmitLeadRequest {
        gclid: Some("CjwKCAtest".to_string()),
        ..valid_request()
    };
    service.submit(request).await.unwrap();

    let lead = repository.first_lead();
    assert_eq!(lead.source, None);
}

#[tokio::test]
async fn test_submit_with_explicit_source_wins_over_click_id() {
    let repository = Arc::new(MockRepository::default());
    let service = make_service(repository.clone());

    let request = SubmitLeadRequest {
        source: Some("facebook".to_string()),
        fbclid: Some("IwAR123".to_string()),
        ..valid_request()
    };
    service.submit(request).await.unwrap();

    let lead = repository.first_lead();
    assert_eq!(lead.source.as_deref(), Some("facebook"));
}

#[tokio::test]
async fn test_conversion_row_carries_derived_fbc() {
    let repository = Arc::new(MockRepository::default());
    let service = make_service(repository.clone());

    let request = SubmitLeadRequest {
        fbclid: Some("IwAR123".to_string()),
        ..valid_request()
    };
    service.submit(request).await.unwrap();

    let conversions = repository.conversions.lock().unwrap();
    let conversion = &conversions[0];
    assert_eq!(conversion.event_name, "Lead");
    assert_eq!(conversion.value, 0.0);
    assert_eq!(conversion.currency, "BRL");
    assert!(!conversion.event_id.is_empty());
    let fbc = conversion.fbc.as_deref().unwrap();
    assert!(fbc.starts_with("fb.1."));
    assert!(fbc.ends_with(".IwAR123"));
}

#[tokio::test]
async fn test_duplicate_email_rejected_without_second_row() {
    let repository = Arc::new(MockRepository::default());
    let service = make_service(repository.clone());

    service.submit(valid_request()).await.unwrap();

    // Same email, different phone
    let request = SubmitLeadRequest {
        phone: "+55 (11) 98765-4321".to_string(),
        ..valid_request()
    };
    let outcome = service.submit(request).await.unwrap();

    assert!(matches!(
        outcome,
        SubmitLeadOutcome::Duplicate(DuplicateField::Email)
    ));
    assert_eq!(repository.lead_count(), 1);
    // No conversion recorded for the rejected submission
    assert_eq!(repository.conversion_count(), 1);
}

#[tokio::test]
async fn test_duplicate_phone_rejected() {
    let repository = Arc::new(MockRepository::default());
    let service = make_service(repository.clone());

    service.submit(valid_request()).await.unwrap();

    let request = SubmitLeadRequest {
        email: "other@example.com".to_string(),
        ..valid_request()
    };
    let outcome = service.submit(request).await.unwrap();

    assert!(matches!(
        outcome,
        SubmitLeadOutcome::Duplicate(DuplicateField::Phone)
    ));
    assert_eq!(repository.lead_count(), 1);
}

#[tokio::test]
async fn test_invalid_payload_rejected_before_insert() {
    let repository = Arc::new(MockRepository::default());
    let service = make_service(repository.clone());

    let request = SubmitLeadRequest {
        name: "J".to_string(),
        ..valid_request()
    };
    let err = service.submit(request).await.unwrap_err();

    assert!(matches!(err, LeadgateError::Validation(_)));
    assert_eq!(repository.lead_count(), 0);
}

#[tokio::test]
async fn test_insert_failure_surfaces_as_database_error() {
    let repository = Arc::new(MockRepository::default());
    repository.set_fail_inserts(true);
    let service = make_service(repository.clone());

    let err = service.submit(valid_request()).await.unwrap_err();
    assert!(matches!(err, LeadgateError::DatabaseOperation(_)));
}
