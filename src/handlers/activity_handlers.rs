use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::api::{ApiClient, ApiError};
use crate::errors::{AppError, render};
use crate::flash::{self, Flash};
use crate::templates_structs::ActivitiesTemplate;
use crate::views;

#[derive(Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

#[derive(Deserialize)]
pub struct UnregisterForm {
    pub email: String,
}

/// Activity listing. Re-fetches the catalog from the upstream on every
/// request; the post-action redirects land here, which is what makes a
/// signup or unregister visible.
pub async fn index(
    api: web::Data<ApiClient>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let flash = flash::take_flash(&session);

    match api.fetch_activities().await {
        Ok(catalog) => {
            let cards = views::build_cards(&catalog);
            render(ActivitiesTemplate { cards, flash, load_failed: false })
        }
        Err(e) => {
            log::error!("Failed to load activities from upstream: {e}");
            render(ActivitiesTemplate { cards: Vec::new(), flash, load_failed: true })
        }
    }
}

pub async fn signup(
    api: web::Data<ApiClient>,
    session: Session,
    form: web::Form<SignupForm>,
) -> Result<HttpResponse, AppError> {
    match api.signup(&form.activity, &form.email).await {
        Ok(confirmation) => {
            flash::set_flash(&session, Flash::success(confirmation.message));
        }
        Err(ApiError::Rejected { detail, .. }) => {
            let message = detail.unwrap_or_else(|| "An error occurred".to_string());
            flash::set_flash(&session, Flash::error(message));
        }
        Err(e) => {
            log::error!("Signup request failed: {e}");
            flash::set_flash(&session, Flash::error("Failed to sign up. Please try again."));
        }
    }

    Ok(see_other("/"))
}

pub async fn unregister(
    api: web::Data<ApiClient>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<UnregisterForm>,
) -> Result<HttpResponse, AppError> {
    let activity = path.into_inner();

    match api.unregister(&activity, &form.email).await {
        Ok(confirmation) => {
            flash::set_flash(&session, Flash::success(confirmation.message));
        }
        Err(ApiError::Rejected { detail, .. }) => {
            let message = detail.unwrap_or_else(|| "Failed to unregister".to_string());
            flash::set_flash(&session, Flash::error(message));
        }
        Err(e) => {
            log::error!("Unregister request failed: {e}");
            flash::set_flash(&session, Flash::error("Failed to unregister participant"));
        }
    }

    Ok(see_other("/"))
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}
