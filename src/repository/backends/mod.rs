pub mod sea_orm;
