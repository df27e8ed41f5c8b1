use log::info;
use url::Url;

use crate::error::ApiError;
use crate::models::catalog::RuleCatalog;
use crate::models::hostel::Hostel;
use crate::services::api_client::HostelApi;

/// Fetches the hostel shown in the booking dialog.
pub async fn load_listing<A: HostelApi>(
    api: &A,
    hostel_id: &str,
    rules: &RuleCatalog,
    base_url: &Url,
) -> Result<Hostel, ApiError> {
    let record = api.fetch_hostel(hostel_id).await?;
    let hostel = Hostel::from_record(hostel_id, &record, rules, base_url);
    info!(
        "Loaded hostel {} with {} sharing option(s)",
        hostel_id,
        hostel.sharing_options.len()
    );
    Ok(hostel)
}
