//! Cookie & crumb acquisition for the Yahoo quoteSummary endpoint.

use crate::core::error::PulseError;
use reqwest::header::SET_COOKIE;

impl super::PulseClient {
    pub(crate) async fn ensure_credentials(&self) -> Result<(), PulseError> {
        if self.state.read().await.crumb.is_some() {
            return Ok(());
        }

        // Only one task performs the handshake; the rest wait and re-check.
        let _guard = self.credential_fetch_lock.lock().await;
        if self.state.read().await.crumb.is_some() {
            return Ok(());
        }

        self.get_cookie().await?;
        self.get_crumb_internal().await?;
        Ok(())
    }

    pub(crate) async fn clear_crumb(&self) {
        self.state.write().await.crumb = None;
    }

    pub(crate) async fn crumb(&self) -> Option<String> {
        self.state.read().await.crumb.clone()
    }

    async fn get_cookie(&self) -> Result<(), PulseError> {
        let req = self.http.get(self.cookie_url.clone());
        let resp = self.send_with_retry(req, None).await?;

        let cookie = resp
            .headers()
            .get(SET_COOKIE)
            .ok_or_else(|| PulseError::Auth("no cookie received from the consent endpoint".into()))?
            .to_str()
            .map_err(|_| PulseError::Auth("invalid cookie header format".into()))?
            .to_string();

        self.state.write().await.cookie = Some(cookie);
        Ok(())
    }

    async fn get_crumb_internal(&self) -> Result<(), PulseError> {
        if self.state.read().await.cookie.is_none() {
            return Err(PulseError::Auth("cookie is missing, cannot get crumb".into()));
        }

        let req = self.http.get(self.crumb_url.clone());
        let resp = self.send_with_retry(req, None).await?;
        if !resp.status().is_success() {
            return Err(PulseError::Auth(format!(
                "crumb request failed with status {}",
                resp.status().as_u16()
            )));
        }
        let crumb = resp.text().await?;

        if crumb.is_empty() || crumb.contains('{') || crumb.contains('<') {
            return Err(PulseError::Auth(format!("received invalid crumb: {crumb}")));
        }

        self.state.write().await.crumb = Some(crumb);
        Ok(())
    }
}
