// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use gymslot_domain::{
    DomainError, FactoryConfigError, ForbiddenToSeeTraining, HourError, TrainingError, UserError,
};
use gymslot_persistence::PersistenceError;

use crate::services::ServiceError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. Every variant maps to a stable [`slug`](ApiError::slug).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The requesting user may not touch the resource.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// A human-readable description of the refusal.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A collaborating service failed or refused the change.
    ExternalService {
        /// The service that failed.
        service: String,
        /// A description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the stable identifier of the error kind.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "incorrect-input",
            Self::DomainRuleViolation { .. } => "domain-rule-violation",
            Self::Unauthorized { .. } => "authorization",
            Self::ResourceNotFound { .. } => "not-found",
            Self::ExternalService { .. } => "external-service",
            Self::Internal { .. } => "internal",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::Unauthorized { action, message } => {
                write!(f, "Unauthorized to {action}: {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ExternalService { service, message } => {
                write!(f, "{service} service failed: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

fn invalid_input(field: &str, err: &impl std::fmt::Display) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

fn rule_violation(rule: &str, err: &impl std::fmt::Display) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message: err.to_string(),
    }
}

/// Translates an hour error into an API error.
#[must_use]
pub fn translate_hour_error(err: &HourError) -> ApiError {
    match err {
        HourError::NotFullHour { .. }
        | HourError::PastHour { .. }
        | HourError::TooDistantDate { .. }
        | HourError::TooEarlyHour { .. }
        | HourError::TooLateHour { .. } => invalid_input("hour", err),
        HourError::EmptyAvailability | HourError::UnknownAvailability(_) => {
            invalid_input("availability", err)
        }
        HourError::TrainingScheduled => rule_violation("hour_has_training", err),
        HourError::NoTrainingScheduled => rule_violation("hour_training_required", err),
        HourError::HourNotAvailable => rule_violation("hour_available", err),
    }
}

/// Translates a training error into an API error.
#[must_use]
pub fn translate_training_error(err: &TrainingError) -> ApiError {
    match err {
        TrainingError::EmptyTrainingUuid => invalid_input("training_uuid", err),
        TrainingError::EmptyUserUuid => invalid_input("user_uuid", err),
        TrainingError::EmptyUserName => invalid_input("user_name", err),
        TrainingError::ZeroTrainingTime => invalid_input("time", err),
        TrainingError::NoteTooLong { .. } => invalid_input("notes", err),
        TrainingError::AlreadyCanceled => rule_violation("training_not_canceled", err),
        TrainingError::CantRescheduleBeforeTime { .. } => {
            rule_violation("free_reschedule_notice", err)
        }
        TrainingError::NoRescheduleRequested => rule_violation("reschedule_requested", err),
        TrainingError::ApproveBySameUserType { .. } => {
            rule_violation("approve_by_other_party", err)
        }
    }
}

/// Translates a user error into an API error.
#[must_use]
pub fn translate_user_error(err: &UserError) -> ApiError {
    match err {
        UserError::MissingUserUuid => invalid_input("user_uuid", err),
        UserError::InvalidUserType(_) => invalid_input("user_type", err),
    }
}

fn translate_factory_config_error(err: &FactoryConfigError) -> ApiError {
    invalid_input("factory_config", err)
}

fn translate_forbidden(err: &ForbiddenToSeeTraining) -> ApiError {
    ApiError::Unauthorized {
        action: String::from("access training"),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: &DomainError) -> ApiError {
    match err {
        DomainError::Hour(err) => translate_hour_error(err),
        DomainError::FactoryConfig(err) => translate_factory_config_error(err),
        DomainError::Training(err) => translate_training_error(err),
        DomainError::User(err) => translate_user_error(err),
        DomainError::Forbidden(err) => translate_forbidden(err),
    }
}

/// Translates a persistence error into an API error.
///
/// Storage failures become `Internal`; domain failures carried by the
/// repositories keep their domain meaning.
#[must_use]
pub fn translate_persistence_error(err: &PersistenceError) -> ApiError {
    match err {
        PersistenceError::InvalidHour(err) => translate_hour_error(err),
        PersistenceError::InvalidTraining(err) => translate_training_error(err),
        PersistenceError::Forbidden(err) => translate_forbidden(err),
        PersistenceError::TrainingNotFound(uuid) => ApiError::ResourceNotFound {
            resource_type: String::from("Training"),
            message: format!("Training '{uuid}' does not exist"),
        },
        PersistenceError::DuplicateTraining(_) => rule_violation("unique_training_uuid", err),
        PersistenceError::TrainingTimeTaken(_) => rule_violation("unique_training_time", err),
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::SerializationError(_)
        | PersistenceError::CorruptRecord(_)
        | PersistenceError::TimeOutOfRange(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a service error into an API error.
#[must_use]
pub fn translate_service_error(err: &ServiceError) -> ApiError {
    ApiError::ExternalService {
        service: err.service().to_string(),
        message: err.to_string(),
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(&err)
    }
}

impl From<HourError> for ApiError {
    fn from(err: HourError) -> Self {
        translate_hour_error(&err)
    }
}

impl From<TrainingError> for ApiError {
    fn from(err: TrainingError) -> Self {
        translate_training_error(&err)
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        translate_user_error(&err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(&err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        translate_service_error(&err)
    }
}
