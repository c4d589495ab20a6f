//! Image-side types and helpers
//!
//! [`ImageResult`] is what storage reports for one image. The remaining
//! modules derive response fields from it: [`get_user_from_image`] for the
//! run-as identity and [`create_image_info`] for the verbose bundle.
//! [`reference`] parses the reference strings requests carry.

pub mod info;
pub mod record;
pub mod reference;
pub mod user;

pub use info::{INFO_KEY, create_image_info};
pub use record::{ImageResult, OciImage, OciImageConfig};
pub use reference::{Identifier, Reference};
pub use user::get_user_from_image;
