pub mod hourly_record;
pub mod summary;
pub mod windguru_forecast;
pub mod marine_forecast;
