//! Pending transfer form

use std::fmt;
use std::str::FromStr;

/// Fields of the pending transfer form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    AddressTo,
    Amount,
    Keyword,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::AddressTo,
        FormField::Amount,
        FormField::Keyword,
        FormField::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::AddressTo => "addressTo",
            FormField::Amount => "amount",
            FormField::Keyword => "keyword",
            FormField::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "addressto" | "address_to" | "to" => Ok(FormField::AddressTo),
            "amount" => Ok(FormField::Amount),
            "keyword" => Ok(FormField::Keyword),
            "message" | "msg" => Ok(FormField::Message),
            _ => Err(format!(
                "Unknown field '{}'. Expected one of: addressTo, amount, keyword, message",
                s
            )),
        }
    }
}

/// Values typed by the user for the next transfer
///
/// No validation happens here; the amount is only checked when submitting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingForm {
    pub address_to: String,
    pub amount: String,
    pub keyword: String,
    pub message: String,
}

impl PendingForm {
    /// Copy of the form with one field replaced
    pub fn with_field(&self, field: FormField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.field_mut(field) = value.into();
        next
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::AddressTo => &self.address_to,
            FormField::Amount => &self.amount,
            FormField::Keyword => &self.keyword,
            FormField::Message => &self.message,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::AddressTo => &mut self.address_to,
            FormField::Amount => &mut self.amount,
            FormField::Keyword => &mut self.keyword,
            FormField::Message => &mut self.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_field_changes_only_that_field() {
        let form = PendingForm {
            address_to: "0xB".into(),
            amount: "0.01".into(),
            keyword: "old".into(),
            message: "hi".into(),
        };

        let next = form.with_field(FormField::Keyword, "x");
        assert_eq!(next.keyword, "x");
        assert_eq!(next.address_to, form.address_to);
        assert_eq!(next.amount, form.amount);
        assert_eq!(next.message, form.message);
    }

    #[test]
    fn test_field_names_parse() {
        assert_eq!("addressTo".parse::<FormField>().unwrap(), FormField::AddressTo);
        assert_eq!("address_to".parse::<FormField>().unwrap(), FormField::AddressTo);
        assert_eq!("MSG".parse::<FormField>().unwrap(), FormField::Message);
        assert!("fee".parse::<FormField>().is_err());

        for field in FormField::ALL {
            assert_eq!(field.as_str().parse::<FormField>().unwrap(), field);
        }
    }
}
