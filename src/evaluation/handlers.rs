use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::auth::AuthenticatedUser;
use crate::db::{Evaluation, PropertyDetails};
use crate::error::AppError;
use crate::evaluation::prompt::{build_prompt, SYSTEM_INSTRUCTION};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    pub address: Option<String>,
    pub area: Option<f64>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub parking_spots: Option<i32>,
    pub description: Option<String>,
}

impl EvaluationRequest {
    /// Address and a positive area are required; the rest is optional.
    pub fn validate(self) -> Result<PropertyDetails, AppError> {
        let address = self
            .address
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .ok_or_else(|| AppError::ValidationError("address is required".into()))?;

        let area = match self.area {
            Some(area) if area.is_finite() && area > 0.0 => area,
            _ => return Err(AppError::ValidationError("area must be a positive number".into())),
        };

        let counts = [self.bedrooms, self.bathrooms, self.parking_spots];
        if counts.iter().flatten().any(|n| *n < 0) {
            return Err(AppError::ValidationError("room and parking counts cannot be negative".into()));
        }

        Ok(PropertyDetails {
            address,
            area,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            parking_spots: self.parking_spots,
            description: self.description.filter(|d| !d.trim().is_empty()),
        })
    }
}

#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn create_evaluation(
    user: AuthenticatedUser,
    req: web::Json<EvaluationRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let property = req.into_inner().validate()?;
    info!(address = %property.address, "Evaluating property");

    let prompt = build_prompt(&property);
    let text = state
        .completion
        .complete(SYSTEM_INSTRUCTION, &prompt)
        .await
        .map_err(|e| {
            error!("Completion request failed: {}", e);
            AppError::from(e)
        })?;

    let evaluation = Evaluation::new(property, text, user.user_id);
    let stored = state.store.create_evaluation(&evaluation).await?;

    info!(evaluation_id = %stored.id, "Evaluation stored");
    Ok(HttpResponse::Ok().json(stored))
}
