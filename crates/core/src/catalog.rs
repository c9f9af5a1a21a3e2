//! Static registry of onboarding form types.
//!
//! Every compliance document a new hire must complete is described here
//! once: identifier, human label, and required field schema. Both the
//! submission path and the aggregate-progress path consult this registry,
//! so "what counts as complete" has a single source of truth. The catalog
//! is built at process start and never mutated.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::FormTypeId;

/// Value kind accepted for a required form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Non-empty string.
    Text,
    /// JSON boolean. `false` is accepted -- declination forms (e.g. the
    /// hepatitis B series) legitimately record a "no".
    Boolean,
    /// ISO-8601 calendar date string (`YYYY-MM-DD`).
    Date,
}

/// One required field in a form type's schema.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn text(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Text,
    }
}

const fn boolean(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Boolean,
    }
}

const fn date(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Date,
    }
}

/// Catalog entry describing one onboarding form type.
///
/// Every submission additionally carries an electronic signature and
/// signature date; those are mandatory for all types and are modeled as
/// dedicated ledger columns rather than schema fields.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FormTypeDescriptor {
    pub id: FormTypeId,
    pub label: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FormTypeDescriptor {
    /// Check submitted fields against this type's required schema.
    ///
    /// Reports the first violated field: missing, wrong kind, or unknown.
    /// Unknown fields are rejected so the ledger only ever records what a
    /// descriptor defines.
    pub fn validate_fields(
        &self,
        fields: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), CoreError> {
        for spec in self.fields {
            let value = fields.get(spec.name).ok_or_else(|| {
                CoreError::invalid_field(spec.name, "required field is missing")
            })?;
            match spec.kind {
                FieldKind::Text => {
                    let ok = value.as_str().is_some_and(|s| !s.trim().is_empty());
                    if !ok {
                        return Err(CoreError::invalid_field(
                            spec.name,
                            "must be a non-empty string",
                        ));
                    }
                }
                FieldKind::Boolean => {
                    if !value.is_boolean() {
                        return Err(CoreError::invalid_field(spec.name, "must be a boolean"));
                    }
                }
                FieldKind::Date => {
                    let ok = value
                        .as_str()
                        .is_some_and(|s| s.parse::<crate::types::Date>().is_ok());
                    if !ok {
                        return Err(CoreError::invalid_field(
                            spec.name,
                            "must be a date in YYYY-MM-DD format",
                        ));
                    }
                }
            }
        }
        for name in fields.keys() {
            if !self.fields.iter().any(|spec| spec.name == name) {
                return Err(CoreError::invalid_field(
                    name.clone(),
                    "is not part of this form",
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Standard form set
// ---------------------------------------------------------------------------

pub const FORM_PERSONAL_INFORMATION: FormTypeId = "personal-information";
pub const FORM_EMERGENCY_CONTACT: FormTypeId = "emergency-contact";
pub const FORM_FEDERAL_TAX_WITHHOLDING: FormTypeId = "federal-tax-withholding";
pub const FORM_STATE_TAX_WITHHOLDING: FormTypeId = "state-tax-withholding";
pub const FORM_DIRECT_DEPOSIT: FormTypeId = "direct-deposit";
pub const FORM_EMPLOYMENT_ELIGIBILITY: FormTypeId = "employment-eligibility";
pub const FORM_HANDBOOK_ACKNOWLEDGMENT: FormTypeId = "handbook-acknowledgment";
pub const FORM_CONFIDENTIALITY_AGREEMENT: FormTypeId = "confidentiality-agreement";
pub const FORM_BACKGROUND_CHECK: FormTypeId = "background-check-authorization";
pub const FORM_DRUG_SCREEN_CONSENT: FormTypeId = "drug-screen-consent";
pub const FORM_TB_SCREENING: FormTypeId = "tb-screening";
pub const FORM_HEPATITIS_B: FormTypeId = "hepatitis-b-vaccination";
pub const FORM_COMPLIANCE_STATEMENT: FormTypeId = "compliance-statement";

/// The standard required set. Completion means one recorded submission for
/// every entry in this list.
const STANDARD_FORMS: &[FormTypeDescriptor] = &[
    FormTypeDescriptor {
        id: FORM_PERSONAL_INFORMATION,
        label: "Personal Information",
        fields: &[
            text("street_address"),
            text("city"),
            text("state"),
            text("postal_code"),
            text("phone"),
            date("date_of_birth"),
        ],
    },
    FormTypeDescriptor {
        id: FORM_EMERGENCY_CONTACT,
        label: "Emergency Contact",
        fields: &[
            text("contact_name"),
            text("relationship"),
            text("contact_phone"),
        ],
    },
    FormTypeDescriptor {
        id: FORM_FEDERAL_TAX_WITHHOLDING,
        label: "Federal Tax Withholding Election",
        fields: &[
            text("filing_status"),
            boolean("multiple_jobs"),
            text("dependents_amount"),
            text("extra_withholding"),
        ],
    },
    FormTypeDescriptor {
        id: FORM_STATE_TAX_WITHHOLDING,
        label: "State Tax Withholding Election",
        fields: &[
            text("state"),
            text("filing_status"),
            text("allowances"),
        ],
    },
    FormTypeDescriptor {
        id: FORM_DIRECT_DEPOSIT,
        label: "Direct Deposit Authorization",
        fields: &[
            text("bank_name"),
            text("routing_number"),
            text("account_number"),
            text("account_type"),
        ],
    },
    FormTypeDescriptor {
        id: FORM_EMPLOYMENT_ELIGIBILITY,
        label: "Employment Eligibility Verification",
        fields: &[
            text("citizenship_status"),
            text("document_title"),
            text("document_number"),
            date("document_expiration"),
        ],
    },
    FormTypeDescriptor {
        id: FORM_HANDBOOK_ACKNOWLEDGMENT,
        label: "Employee Handbook Acknowledgment",
        fields: &[boolean("handbook_received"), boolean("handbook_read")],
    },
    FormTypeDescriptor {
        id: FORM_CONFIDENTIALITY_AGREEMENT,
        label: "Confidentiality Agreement",
        fields: &[
            boolean("agrees_to_confidentiality"),
            boolean("agrees_to_return_property"),
        ],
    },
    FormTypeDescriptor {
        id: FORM_BACKGROUND_CHECK,
        label: "Background Check Authorization",
        fields: &[
            boolean("authorizes_background_check"),
            text("legal_name"),
            date("date_of_birth"),
        ],
    },
    FormTypeDescriptor {
        id: FORM_DRUG_SCREEN_CONSENT,
        label: "Drug Screen Consent",
        fields: &[boolean("consents_to_screening"), text("collection_site")],
    },
    FormTypeDescriptor {
        id: FORM_TB_SCREENING,
        label: "Tuberculosis Screening Questionnaire",
        fields: &[
            boolean("prior_positive_test"),
            boolean("current_symptoms"),
            date("last_test_date"),
        ],
    },
    FormTypeDescriptor {
        id: FORM_HEPATITIS_B,
        label: "Hepatitis B Vaccination Election",
        fields: &[boolean("accepts_vaccination"), text("election_reason")],
    },
    FormTypeDescriptor {
        id: FORM_COMPLIANCE_STATEMENT,
        label: "Compliance Statement",
        fields: &[
            boolean("code_of_conduct_ack"),
            boolean("hipaa_privacy_ack"),
            boolean("abuse_reporting_ack"),
            boolean("infection_control_ack"),
            boolean("workplace_safety_ack"),
            boolean("corporate_compliance_ack"),
            boolean("conflict_of_interest_disclosed"),
            text("conflict_details"),
            text("employee_initials"),
        ],
    },
];

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Read-only registry of all form types. Built once at process start and
/// shared by the submission and aggregate-progress paths.
#[derive(Debug, Clone, Copy)]
pub struct FormCatalog {
    descriptors: &'static [FormTypeDescriptor],
}

impl FormCatalog {
    /// The standard catalog of required onboarding forms.
    pub fn standard() -> Self {
        FormCatalog {
            descriptors: STANDARD_FORMS,
        }
    }

    /// Look up a descriptor by form type id.
    pub fn get(&self, form_type: &str) -> Option<&'static FormTypeDescriptor> {
        self.descriptors.iter().find(|d| d.id == form_type)
    }

    pub fn contains(&self, form_type: &str) -> bool {
        self.get(form_type).is_some()
    }

    /// Number of form types required for completion.
    pub fn required_count(&self) -> usize {
        self.descriptors.len()
    }

    /// All descriptors, in catalog order.
    pub fn descriptors(&self) -> &'static [FormTypeDescriptor] {
        self.descriptors
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
