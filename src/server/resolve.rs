//! Reference expansion into lookup candidates

use crate::error::{Result, StatusError};
use crate::server::ImageService;
use tokio_util::sync::CancellationToken;

impl ImageService {
    /// Expand `image` into candidate names, in storage's order of preference.
    ///
    /// A name storage cannot parse is still tried literally, as the only
    /// candidate. Any other resolution error fails the request. On success the
    /// list is never empty.
    pub async fn resolve_candidates(
        &self,
        cancel: &CancellationToken,
        image: &str,
    ) -> Result<Vec<String>> {
        let resolved = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(StatusError::Cancelled),
            resolved = self.store.resolve_names(&self.system_context, image) => resolved,
        };

        match resolved {
            Ok(names) if !names.is_empty() => Ok(names),
            Ok(_) => Ok(vec![image.to_string()]),
            Err(err) if err.is_unparseable() => {
                self.logger
                    .debug(&format!("{} is not a reference, trying it as a literal name", image));
                Ok(vec![image.to_string()])
            }
            Err(err) => Err(err),
        }
    }
}
