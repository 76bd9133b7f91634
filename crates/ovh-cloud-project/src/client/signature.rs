use sha1::{Digest, Sha1};

pub(crate) const HEADER_APPLICATION: &str = "X-Ovh-Application";
pub(crate) const HEADER_CONSUMER: &str = "X-Ovh-Consumer";
pub(crate) const HEADER_TIMESTAMP: &str = "X-Ovh-Timestamp";
pub(crate) const HEADER_SIGNATURE: &str = "X-Ovh-Signature";
pub(crate) const HEADER_QUERY_ID: &str = "X-Ovh-QueryId";

/// Signature of an authenticated OVH api call.
///
/// `url` is the full request url including the query string, `body` the
/// exact request body (empty for `GET`).
pub(crate) fn sign(
    application_secret: &str,
    consumer_key: &str,
    method: &reqwest::Method,
    url: &str,
    body: &str,
    timestamp: i64,
) -> String {
    let mut hasher = Sha1::new();
    hasher.update(
        format!(
            "{application_secret}+{consumer_key}+{}+{url}+{body}+{timestamp}",
            method.as_str()
        )
        .as_bytes(),
    );

    format!("$1${}", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use reqwest::Method;

    use super::*;

    const URL: &str = "https://eu.api.ovh.com/1.0/cloud/project";

    #[test]
    fn test_signature_format() {
        let signature = sign("secret", "consumer", &Method::GET, URL, "", 1_700_000_000);
        assert!(signature.starts_with("$1$"));
        assert_eq!(signature.len(), 3 + 40);
        assert!(signature[3..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_known_value() {
        assert_eq!(
            sign("secret", "consumer", &Method::GET, URL, "", 1_700_000_000),
            "$1$e8ce0af60a86b525080dba9824369fb03962c7e7"
        );
    }

    #[test]
    fn test_signature_covers_every_input() {
        let reference = sign("secret", "consumer", &Method::GET, URL, "", 1_700_000_000);
        assert_eq!(
            reference,
            sign("secret", "consumer", &Method::GET, URL, "", 1_700_000_000)
        );

        let variants = [
            sign("other", "consumer", &Method::GET, URL, "", 1_700_000_000),
            sign("secret", "other", &Method::GET, URL, "", 1_700_000_000),
            sign("secret", "consumer", &Method::POST, URL, "", 1_700_000_000),
            sign(
                "secret",
                "consumer",
                &Method::GET,
                "https://ca.api.ovh.com/1.0/cloud/project",
                "",
                1_700_000_000,
            ),
            sign("secret", "consumer", &Method::GET, URL, "{}", 1_700_000_000),
            sign("secret", "consumer", &Method::GET, URL, "", 1_700_000_001),
        ];
        for variant in variants {
            assert_ne!(reference, variant);
        }
    }
}
