//! Verbose image info attached to status responses on request

use crate::error::{Result, StatusError};
use crate::image::record::ImageResult;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Key the serialized bundle is stored under in the response info map
pub const INFO_KEY: &str = "info";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageInfo<'a, C: Serialize> {
    #[serde(skip_serializing_if = "labels_absent")]
    labels: Option<&'a BTreeMap<String, String>>,
    image_spec: Option<&'a C>,
}

fn labels_absent(labels: &Option<&BTreeMap<String, String>>) -> bool {
    labels.map_or(true, |l| l.is_empty())
}

/// Serialize labels and image config into the `info` map of a response.
pub fn create_image_info(result: &ImageResult) -> Result<HashMap<String, String>> {
    encode_image_info(result.labels.as_ref(), result.oci_config.as_ref())
}

fn encode_image_info<C: Serialize>(
    labels: Option<&BTreeMap<String, String>>,
    image_spec: Option<&C>,
) -> Result<HashMap<String, String>> {
    let info = ImageInfo { labels, image_spec };
    let json = serde_json::to_string(&info)
        .map_err(|e| StatusError::ImageInfo(Box::new(StatusError::Serialization(e))))?;
    Ok(HashMap::from([(INFO_KEY.to_string(), json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::record::{OciImage, OciImageConfig};
    use serde::Serializer;

    fn parse(info: &HashMap<String, String>) -> serde_json::Value {
        serde_json::from_str(&info[INFO_KEY]).unwrap()
    }

    #[test]
    fn test_info_contains_labels_and_config() {
        let mut record = ImageResult::new("abc");
        record.labels = Some(BTreeMap::from([("tier".to_string(), "web".to_string())]));
        record.oci_config = Some(OciImage {
            architecture: "arm64".into(),
            os: "linux".into(),
            config: Some(OciImageConfig {
                user: Some("nobody".into()),
                ..OciImageConfig::default()
            }),
            ..OciImage::default()
        });

        let info = create_image_info(&record).unwrap();
        assert_eq!(info.len(), 1);
        let value = parse(&info);
        assert_eq!(value["labels"]["tier"], "web");
        assert_eq!(value["imageSpec"]["architecture"], "arm64");
        assert_eq!(value["imageSpec"]["config"]["User"], "nobody");
    }

    #[test]
    fn test_absent_labels_are_omitted() {
        let record = ImageResult::new("abc");
        let value = parse(&create_image_info(&record).unwrap());
        assert!(value.get("labels").is_none());
        assert!(value["imageSpec"].is_null());

        let mut record = ImageResult::new("abc");
        record.labels = Some(BTreeMap::new());
        let value = parse(&create_image_info(&record).unwrap());
        assert!(value.get("labels").is_none());
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("config cannot be encoded"))
        }
    }

    #[test]
    fn test_serialization_failure_is_an_error() {
        let err = encode_image_info(None, Some(&Unencodable)).unwrap_err();
        assert!(matches!(err, StatusError::ImageInfo(_)));
        assert!(err.to_string().starts_with("creating image info"));
    }
}
