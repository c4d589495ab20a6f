//! Image status lookup across resolved candidates

use crate::api::{Image, ImageStatusRequest, ImageStatusResponse, Int64Value};
use crate::error::{Result, StatusError};
use crate::image::{ImageResult, create_image_info, get_user_from_image};
use crate::server::ImageService;
use tokio_util::sync::CancellationToken;

/// Failures collected while no candidate has matched yet
#[derive(Debug, Default)]
pub struct LookupOutcome {
    pub last_err: Option<StatusError>,
    pub not_found: bool,
}

impl LookupOutcome {
    pub fn record(&mut self, err: StatusError) {
        if err.is_not_found() {
            self.not_found = true;
        } else {
            self.last_err = Some(err);
        }
    }

    /// Terminal result when every candidate failed.
    ///
    /// An operational error wins over not-found; not-found alone is an empty
    /// response.
    pub fn finish(self) -> Result<ImageStatusResponse> {
        match (self.last_err, self.not_found) {
            (Some(err), _) => Err(err),
            (None, true) => Ok(ImageStatusResponse::empty()),
            // No candidate was looked up
            (None, false) => Ok(ImageStatusResponse::empty()),
        }
    }
}

impl ImageService {
    /// Report the status of the image named by `req`.
    pub async fn image_status(
        &self,
        cancel: &CancellationToken,
        req: &ImageStatusRequest,
    ) -> Result<ImageStatusResponse> {
        let image = req.image_ref();
        if image.is_empty() {
            return Err(StatusError::NoImageSpecified);
        }

        self.logger.info(&format!("Checking image status: {}", image));
        let candidates = self.resolve_candidates(cancel, image).await?;
        let resp = self.aggregate(cancel, &candidates, req.verbose).await?;

        match &resp.image {
            Some(found) => self.logger.info(&format!(
                "Image status: {} {:?} ({})",
                found.id,
                found.repo_tags,
                self.logger.format_size(found.size)
            )),
            None => self.logger.info(&format!("Image {} not found", image)),
        }
        Ok(resp)
    }

    /// Look candidates up in order; the first one storage knows wins.
    pub async fn aggregate(
        &self,
        cancel: &CancellationToken,
        candidates: &[String],
        verbose: bool,
    ) -> Result<ImageStatusResponse> {
        let mut outcome = LookupOutcome::default();

        for candidate in candidates {
            let status = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(StatusError::Cancelled),
                status = self.store.image_status(&self.system_context, candidate) => status,
            };

            match status {
                Ok(status) => return build_response(status, verbose),
                Err(err) => {
                    if err.is_not_found() {
                        self.logger.debug(&format!("can't find {}", candidate));
                    } else {
                        self.logger
                            .warning(&format!("error getting status from {}: {}", candidate, err));
                    }
                    outcome.record(err);
                }
            }
        }

        outcome.finish()
    }
}

fn build_response(status: ImageResult, verbose: bool) -> Result<ImageStatusResponse> {
    let info = if verbose {
        create_image_info(&status)?
    } else {
        Default::default()
    };
    let (uid, username) = get_user_from_image(&status.user);

    Ok(ImageStatusResponse {
        image: Some(Image {
            id: status.id,
            repo_tags: status.repo_tags,
            repo_digests: status.repo_digests,
            size: status.size.unwrap_or(0),
            uid: uid.map(|value| Int64Value { value }),
            username: username.unwrap_or_default(),
        }),
        info,
    })
}
