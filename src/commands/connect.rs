use crate::services::SessionCoordinator;
use crate::utils::short_address;

pub async fn execute(session: &SessionCoordinator) -> Result<String, String> {
    if let Some(account) = session.current_account() {
        return Ok(format!("Already connected as {}", account));
    }

    match session.connect().await {
        Ok(Some(account)) => Ok(format!("🔗 Connected as {}", short_address(&account))),
        Ok(None) => Ok("No wallet provider available, nothing to connect".to_string()),
        Err(e) => Err(e.user_message()),
    }
}
