use validator::Validate;
use crate::errors::AppError;

pub const MISSING_FIELDS: &str = "Required fields are missing";

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate()
        .map_err(|err| {
            log::debug!("Rejected payload: {}", err);
            AppError::BadRequest(MISSING_FIELDS.to_string())
        })
}
