pub mod hourly_record;
pub mod open_meteo_forecast;
