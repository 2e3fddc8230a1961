//! # Provisioning Identifiers
//!
//! Newtypes for the identifiers that address deployments in a hosted
//! fleet. Each identifier is a distinct type, so an [`ApplicationId`]
//! cannot be passed where a [`ClusterId`] is expected.
//!
//! ## Validation
//!
//! All identifiers validate their parts at construction time. A value of
//! one of these types is always well-formed, and deserialization routes
//! through the same validation, so no invalid identifier can enter the
//! system through a persistence or API boundary.
//!
//! ## Serialized Forms
//!
//! - [`ApplicationId`]: `tenant:application:instance`
//! - [`ZoneId`]: `environment.region`
//! - [`ClusterId`]: the raw cluster name

use serde::Deserialize;

use crate::error::ValidationError;

/// Implements `Serialize` and `Deserialize` for identifiers with a
/// canonical serialized string form. Serializes via `Display`;
/// deserializes as a plain `String`, then routes through the type's
/// `from_serialized()` parser so that invalid values are rejected at the
/// boundary rather than silently accepted.
macro_rules! impl_serialized_form_serde {
    ($ty:ident) => {
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::from_serialized(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A part of an identifier: non-empty, ASCII alphanumeric plus `-` and `_`.
fn is_valid_part(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// ---------------------------------------------------------------------------
// ApplicationId
// ---------------------------------------------------------------------------

/// The identity of a deployed application: tenant, application name, and
/// instance name.
///
/// Two deployments with the same tenant and application but different
/// instance names are distinct owners. The serialized form is
/// `tenant:application:instance`.
///
/// # Validation
///
/// Each part must be non-empty and use only ASCII alphanumerics, `-`,
/// and `_`. The `:` delimiter can therefore never appear inside a part,
/// and the serialized form parses unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApplicationId {
    tenant: String,
    application: String,
    instance: String,
}

impl_serialized_form_serde!(ApplicationId);

impl ApplicationId {
    /// Create an application id from its three parts, validating each.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidApplicationId`] carrying the
    /// first offending part.
    pub fn new(
        tenant: impl Into<String>,
        application: impl Into<String>,
        instance: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let tenant = tenant.into();
        let application = application.into();
        let instance = instance.into();
        for part in [&tenant, &application, &instance] {
            if !is_valid_part(part) {
                return Err(ValidationError::InvalidApplicationId(part.clone()));
            }
        }
        Ok(Self {
            tenant,
            application,
            instance,
        })
    }

    /// Parse an application id from its `tenant:application:instance` form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSerializedForm`] if the string
    /// does not have exactly three `:`-separated parts, or
    /// [`ValidationError::InvalidApplicationId`] if a part is malformed.
    pub fn from_serialized(s: &str) -> Result<Self, ValidationError> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(tenant), Some(application), Some(instance), None) => {
                Self::new(tenant, application, instance)
            }
            _ => Err(ValidationError::InvalidSerializedForm {
                input: s.to_string(),
                expected: "tenant:application:instance",
            }),
        }
    }

    /// The tenant that owns the application.
    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// The application name within the tenant.
    pub fn application(&self) -> &str {
        &self.application
    }

    /// The instance name within the application.
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// The `tenant:application:instance` form used in serialized state.
    pub fn serialized_form(&self) -> String {
        format!("{}:{}:{}", self.tenant, self.application, self.instance)
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.tenant, self.application, self.instance)
    }
}

// ---------------------------------------------------------------------------
// ZoneId
// ---------------------------------------------------------------------------

/// The identity of a zone: an environment and a region, serialized as
/// `environment.region` (e.g. `prod.us-east-1`).
///
/// # Validation
///
/// Both parts must be non-empty and use only ASCII alphanumerics, `-`,
/// and `_`, so the `.` delimiter parses unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneId {
    environment: String,
    region: String,
}

impl_serialized_form_serde!(ZoneId);

impl ZoneId {
    /// Create a zone id from an environment and a region, validating both.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidZoneId`] carrying the first
    /// offending part.
    pub fn new(
        environment: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let environment = environment.into();
        let region = region.into();
        for part in [&environment, &region] {
            if !is_valid_part(part) {
                return Err(ValidationError::InvalidZoneId(part.clone()));
            }
        }
        Ok(Self {
            environment,
            region,
        })
    }

    /// Parse a zone id from its `environment.region` form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSerializedForm`] if the string
    /// does not have exactly two `.`-separated parts, or
    /// [`ValidationError::InvalidZoneId`] if a part is malformed.
    pub fn from_serialized(s: &str) -> Result<Self, ValidationError> {
        let mut parts = s.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(environment), Some(region), None) => Self::new(environment, region),
            _ => Err(ValidationError::InvalidSerializedForm {
                input: s.to_string(),
                expected: "environment.region",
            }),
        }
    }

    /// The environment part (e.g. `prod`, `staging`, `test`).
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// The region part (e.g. `us-east-1`).
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.environment, self.region)
    }
}

// ---------------------------------------------------------------------------
// ClusterId
// ---------------------------------------------------------------------------

/// The name of a cluster within an application deployment.
///
/// Cluster naming varies across applications, so validation is
/// intentionally lenient: any non-empty, non-whitespace-only string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterId(String);

impl_serialized_form_serde!(ClusterId);

impl ClusterId {
    /// Create a cluster id from a string, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidClusterId`] if the string is
    /// empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::InvalidClusterId);
        }
        Ok(Self(s))
    }

    /// Parse a cluster id from its serialized form (the raw name).
    pub fn from_serialized(s: &str) -> Result<Self, ValidationError> {
        Self::new(s)
    }

    /// Access the cluster name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
