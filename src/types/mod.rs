pub mod date_range;
pub mod forecast;
pub mod lat_lon;
pub mod location;
pub mod reference_record;
