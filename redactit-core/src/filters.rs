//! The built-in filter catalog.
//!
//! A fixed, ordered table of well-known sensitive key-name shapes. Order matters:
//! it is the first-match precedence among defaults. The table is built once on
//! first use and never mutated afterwards.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use once_cell::sync::Lazy;

use crate::config::{FilterSpec, Pattern, RegexOptions, REDACTED};
use crate::errors::RedactError;

/// Name and pattern source of every default filter, in canonical order.
const DEFAULT_FILTER_PATTERNS: &[(&str, &str)] = &[
    ("email", r"^.*email.*$"),
    ("phone", r"^.*(phone|mobile|cell|telephone).*$"),
    ("ssn", r"^.*(ssn|social.*security|socialsecurity).*$"),
    (
        "creditCard",
        r"^.*(credit.*card|card.*number|cc.*number|payment.*card|card.*info).*$",
    ),
    (
        "driverLicense",
        r"^.*(driver.*license|license.*number|dl.*number|driving.*license|drivers.*license).*$",
    ),
    ("passport", r"^.*(passport|passport.*number|passport.*id).*$"),
    (
        "ipAddress",
        r"^.*(ip.*address|client.*ip|remote.*ip|user.*ip|ip).*$",
    ),
    (
        "password",
        r"^.*(password|passwd|pwd|token|api.*key|secret|auth.*token|access.*token|bearer.*token).*$",
    ),
    (
        "bankAccount",
        r"^.*(account.*number|bank.*account|routing.*number|iban|bank.*number|account.*info).*$",
    ),
    (
        "dateOfBirth",
        r"^.*(date.*of.*birth|birth.*date|dob|birthday|birth.*day).*$",
    ),
    (
        "taxId",
        r"^.*(tax.*id|ein|taxpayer.*id|federal.*id|tax.*number).*$",
    ),
    (
        "medicalRecord",
        r"^.*(medical.*record|mrn|patient.*id|health.*id|medical.*number).*$",
    ),
    (
        "nationalId",
        r"^.*(national.*id|citizen.*id|personal.*id|government.*id|identity.*number).*$",
    ),
    (
        "deviceId",
        r"^.*(device.*id|device.*identifier|device.*token|imei|android.*id|udid|uuid|hardware.*id|device.*fingerprint).*$",
    ),
    (
        "macAddress",
        r"^.*(mac.*address|device.*mac|wifi.*mac|ethernet.*mac|bluetooth.*mac).*$",
    ),
    (
        "biometric",
        r"^.*(biometric|fingerprint|face.*id|facial.*id|iris.*scan|retina.*scan|voice.*print|dna|palm.*scan).*$",
    ),
    ("address", r"^.*(address|street|apt.*number|po.*box|addr.*line).*$"),
    (
        "postalCode",
        r"^(.*zip([^a-z].*|code.*|postal.*)?|.*(postal|post.*code).*)$",
    ),
    (
        "securityAnswer",
        r"^.*(security.*question|security.*answer|secret.*question|secret.*answer|maiden.*name).*$",
    ),
];

/// A named entry of the catalog.
#[derive(Debug)]
pub struct DefaultFilter {
    pub name: &'static str,
    pub spec: FilterSpec,
}

static DEFAULT_FILTERS: Lazy<Vec<DefaultFilter>> = Lazy::new(|| {
    debug!("Building {} default filters.", DEFAULT_FILTER_PATTERNS.len());
    DEFAULT_FILTER_PATTERNS
        .iter()
        .map(|&(name, source)| {
            let options = RegexOptions {
                case_insensitive: true,
                ..RegexOptions::default()
            };
            let pattern = Pattern::regex_with(source, options)
                .unwrap_or_else(|e| panic!("default filter '{}' has an invalid pattern: {}", name, e));
            DefaultFilter {
                name,
                spec: FilterSpec::Inline {
                    pattern,
                    replacement: Some(REDACTED.to_string()),
                },
            }
        })
        .collect()
});

/// All default filters in canonical order.
pub fn list() -> Vec<FilterSpec> {
    DEFAULT_FILTERS.iter().map(|f| f.spec.clone()).collect()
}

/// Looks up a default filter by name.
pub fn get(name: &str) -> Result<FilterSpec, RedactError> {
    DEFAULT_FILTERS
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.spec.clone())
        .ok_or_else(|| RedactError::UnknownFilter(name.to_string()))
}

/// True iff `name` is a registered default filter.
pub fn is_known(name: &str) -> bool {
    DEFAULT_FILTER_PATTERNS.iter().any(|&(known, _)| known == name)
}

/// Default filter names in canonical order.
pub fn names() -> impl Iterator<Item = &'static str> {
    DEFAULT_FILTER_PATTERNS.iter().map(|&(name, _)| name)
}

/// The catalog entries themselves.
pub fn entries() -> &'static [DefaultFilter] {
    &DEFAULT_FILTERS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(name: &str) -> regex::Regex {
        match get(name).unwrap() {
            FilterSpec::Inline { pattern: Pattern::Regex { regex, .. }, .. } => regex,
            other => panic!("default filter '{}' is not a regex: {:?}", name, other),
        }
    }

    #[test]
    fn test_list_is_ordered_and_complete() {
        let specs = list();
        assert_eq!(specs.len(), 19);
        assert_eq!(names().next(), Some("email"));
        for spec in &specs {
            assert_eq!(spec.replacement(), Some(REDACTED));
            match spec {
                FilterSpec::Inline { pattern, .. } => assert!(pattern.is_regex()),
                FilterSpec::Named(_) => panic!("catalog must hold inline specs"),
            }
        }
    }

    #[test]
    fn test_get_unknown_filter() {
        let err = get("unknown").unwrap_err();
        assert_eq!(err.to_string(), "Unknown default filter: unknown");
    }

    #[test]
    fn test_is_known() {
        for name in [
            "email", "phone", "ssn", "creditCard", "driverLicense", "passport", "ipAddress",
            "password", "bankAccount", "dateOfBirth", "taxId", "medicalRecord", "nationalId",
            "deviceId", "macAddress", "biometric", "address", "postalCode", "securityAnswer",
        ] {
            assert!(is_known(name), "{} should be known", name);
        }
        assert!(!is_known("unknown"));
        assert!(!is_known("invalidFilter"));
        assert!(!is_known(""));
        assert!(!is_known("Email"));
    }

    #[test]
    fn test_email_pattern() {
        let re = matcher("email");
        for key in ["email", "emailAddress", "userEmail", "workEmail", "EMAIL", "EMAILADDRESS"] {
            assert!(re.is_match(key), "{}", key);
        }
        for key in ["name", "address", "phone"] {
            assert!(!re.is_match(key), "{}", key);
        }
    }

    #[test]
    fn test_phone_pattern() {
        let re = matcher("phone");
        for key in ["phone", "phoneNumber", "mobile", "cell", "cellPhone", "telephone", "homePhone", "CELLPHONE"] {
            assert!(re.is_match(key), "{}", key);
        }
        for key in ["email", "name", "address"] {
            assert!(!re.is_match(key), "{}", key);
        }
    }

    #[test]
    fn test_ssn_pattern() {
        let re = matcher("ssn");
        for key in ["ssn", "socialSecurityNumber", "socialsecurity", "social_security_number", "SSN"] {
            assert!(re.is_match(key), "{}", key);
        }
        assert!(!re.is_match("email"));
    }

    #[test]
    fn test_identifier_patterns() {
        assert!(matcher("creditCard").is_match("ccNumber"));
        assert!(matcher("creditCard").is_match("paymentCard"));
        assert!(matcher("driverLicense").is_match("dlNumber"));
        assert!(matcher("passport").is_match("passportId"));
        assert!(matcher("bankAccount").is_match("iban"));
        assert!(matcher("dateOfBirth").is_match("dob"));
        assert!(matcher("taxId").is_match("EIN"));
        assert!(matcher("medicalRecord").is_match("MRN"));
        assert!(matcher("nationalId").is_match("governmentId"));
        assert!(matcher("deviceId").is_match("imei"));
        assert!(matcher("macAddress").is_match("wifiMac"));
        assert!(matcher("biometric").is_match("faceId"));
        assert!(!matcher("creditCard").is_match("address"));
        assert!(!matcher("passport").is_match("name"));
    }

    #[test]
    fn test_ip_address_pattern_matches_bare_ip() {
        let re = matcher("ipAddress");
        for key in ["ipAddress", "clientIp", "remoteIp", "userIp", "ip", "sourceIp", "CLIENTIP"] {
            assert!(re.is_match(key), "{}", key);
        }
        for key in ["email", "name", "address"] {
            assert!(!re.is_match(key), "{}", key);
        }
    }

    #[test]
    fn test_password_pattern() {
        let re = matcher("password");
        for key in ["password", "passwd", "pwd", "token", "apiKey", "secret", "bearerToken", "APIKEY"] {
            assert!(re.is_match(key), "{}", key);
        }
        for key in ["email", "name", "address"] {
            assert!(!re.is_match(key), "{}", key);
        }
    }

    #[test]
    fn test_address_pattern() {
        let re = matcher("address");
        for key in ["address", "billingAddress", "addressLine1", "streetAddress", "aptNumber", "poBox", "AddressLine2"] {
            assert!(re.is_match(key), "{}", key);
        }
        for key in ["email", "phone", "username"] {
            assert!(!re.is_match(key), "{}", key);
        }
    }

    #[test]
    fn test_postal_code_pattern() {
        let re = matcher("postalCode");
        for key in ["zip", "zipCode", "zipcode", "postalCode", "postCode", "zip_plus4", "zipPostal", "ZIP", "POSTALCODE"] {
            assert!(re.is_match(key), "{}", key);
        }
        for key in ["zipper", "zipFile", "email"] {
            assert!(!re.is_match(key), "{}", key);
        }
    }

    #[test]
    fn test_security_answer_pattern() {
        let re = matcher("securityAnswer");
        for key in ["securityQuestion", "securityAnswer", "secretQuestion", "secretAnswer", "motherMaidenName"] {
            assert!(re.is_match(key), "{}", key);
        }
        for key in ["email", "password", "address"] {
            assert!(!re.is_match(key), "{}", key);
        }
    }
}
