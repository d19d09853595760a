pub mod kpi;
pub mod request;
