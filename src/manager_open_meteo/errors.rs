use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenMeteoError {
    #[error("error in communication with Open-Meteo: {0}")]
    Network(String),
    #[error("forecast document error: {0}")]
    Document(String),
}
impl From<serde_json::Error> for OpenMeteoError {
    fn from(e: serde_json::Error) -> OpenMeteoError {
        OpenMeteoError::Document(format!("json document error: {}", e))
    }
}
impl From<ureq::Error> for OpenMeteoError {
    fn from(e: ureq::Error) -> OpenMeteoError {
        OpenMeteoError::Network(format!("http request error: {}", e))
    }
}
