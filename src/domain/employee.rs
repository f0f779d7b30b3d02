//! Employee domain model.
//!
//! An [`Employee`] is the single record type managed by the roster. Records are
//! created without an id; the store assigns one on insert and it never changes
//! afterwards. Department and position are closed catalogs matching the choices
//! offered by the entry forms.

use super::error::{Result, RosterError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date formats accepted by [`parse_date`], tried in order.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Store-assigned employee identifier.
///
/// Identifiers are positive and never reused once a record is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(u64);

impl EmployeeId {
    /// Wraps a raw key, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidInput`] for `0`, which no store ever assigns.
    pub fn new(raw: u64) -> Result<Self> {
        if raw == 0 {
            return Err(RosterError::InvalidInput("employee id must be positive".to_string()));
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates a closed string catalog enum with serde names, `FromStr` and `Display`.
macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )*
        }

        impl $name {
            /// Every value in catalog order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Stored and displayed label.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = RosterError;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        RosterError::InvalidInput(format!(
                            concat!("unknown ", stringify!($name), ": {}"),
                            wanted
                        ))
                    })
            }
        }
    };
}

catalog_enum! {
    /// Organizational unit an employee belongs to.
    Department {
        Analytics => "Analytics",
        Tech => "Tech",
        Marketing => "Marketing",
        Hr => "HR",
        Developer => "Developer",
        Sales => "Sales",
        It => "IT",
        Finance => "Finance",
    }
}

catalog_enum! {
    /// Seniority level or job title.
    Position {
        Junior => "Junior",
        Medior => "Medior",
        Senior => "Senior",
        Manager => "Manager",
        AccountManager => "Account Manager",
        Accountant => "Accountant",
        BackendDeveloper => "Backend Developer",
        BrandManager => "Brand Manager",
        BudgetAnalyst => "Budget Analyst",
        BusinessDevelopmentManager => "Business Development Manager",
        ContentWriter => "Content Writer",
        CustomerSuccessManager => "Customer Success Manager",
        DataAnalyst => "Data Analyst",
        DevOpsEngineer => "DevOps Engineer",
        DigitalMarketingManager => "Digital Marketing Manager",
        FinanceManager => "Finance Manager",
        FinancialAnalyst => "Financial Analyst",
        FrontendDeveloper => "Frontend Developer",
        HrCoordinator => "HR Coordinator",
        HrManager => "HR Manager",
        MarketingSpecialist => "Marketing Specialist",
        MobileDeveloper => "Mobile Developer",
        PayrollSpecialist => "Payroll Specialist",
        QaEngineer => "QA Engineer",
        RecruitmentSpecialist => "Recruitment Specialist",
        SalesManager => "Sales Manager",
        SalesRepresentative => "Sales Representative",
        SecurityEngineer => "Security Engineer",
        SocialMediaManager => "Social Media Manager",
        SoftwareDeveloper => "Software Developer",
        SystemAdministrator => "System Administrator",
        TaxSpecialist => "Tax Specialist",
        TechLead => "Tech Lead",
        TrainingSpecialist => "Training Specialist",
    }
}

/// An employee record.
///
/// `id` is `None` until the record has been persisted. Field names serialize
/// in camelCase, which is also the stored shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_employment: NaiveDate,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub email: String,
    pub department: Department,
    pub position: Position,
}

impl Employee {
    /// First and last name joined by a space, as shown in the delete dialog.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns a copy carrying the given id.
    #[must_use]
    pub fn with_id(mut self, id: EmployeeId) -> Self {
        self.id = Some(id);
        self
    }

    /// Checks the required-field rules enforced by the entry forms.
    ///
    /// The store does not call this; it only rejects malformed keys. Callers
    /// that accept user input should validate before submitting.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidInput`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("phone", &self.phone),
            ("email", &self.email),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(RosterError::InvalidInput(format!("{field} is required")));
        }

        if !looks_like_email(&self.email) {
            return Err(RosterError::InvalidInput(format!("malformed email: {}", self.email)));
        }

        if self.date_of_birth >= self.date_of_employment {
            return Err(RosterError::InvalidInput(
                "dateOfBirth must precede dateOfEmployment".to_string(),
            ));
        }

        Ok(())
    }
}

/// Minimal shape check: one `@` with non-empty local part and a dotted domain.
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

/// Parses a date in `YYYY-MM-DD` or `DD/MM/YYYY` form.
///
/// # Errors
///
/// Returns [`RosterError::InvalidInput`] if neither format matches.
///
/// # Examples
///
/// ```
/// use roster::domain::parse_date;
///
/// assert_eq!(parse_date("15/01/2020")?, parse_date("2020-01-15")?);
/// # Ok::<(), roster::RosterError>(())
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| RosterError::InvalidInput(format!("unrecognized date: {trimmed}")))
}

#[cfg(test)]
pub(crate) fn sample_employee(first_name: &str, email: &str) -> Employee {
    Employee {
        id: None,
        first_name: first_name.to_string(),
        last_name: "Yılmaz".to_string(),
        date_of_employment: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 10).unwrap(),
        phone: "532 123 45 67".to_string(),
        email: email.to_string(),
        department: Department::It,
        position: Position::SoftwareDeveloper,
    }
}
