//! Form types bundled with dynaform.

use super::Schema;
use crate::error::Result;
use crate::field::FieldDefinition;

pub const USER_INFORMATION: &str = "User Information";
pub const ADDRESS_INFORMATION: &str = "Address Information";
pub const PAYMENT_INFORMATION: &str = "Payment Information";

const STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Puducherry",
];

/// All bundled schemas, in display order.
pub fn schemas() -> Result<Vec<Schema>> {
    Ok(vec![user_information()?, address_information()?, payment_information()?])
}

pub fn user_information() -> Result<Schema> {
    Schema::new(
        USER_INFORMATION,
        vec![
            FieldDefinition::text("firstName", "First Name").required(),
            FieldDefinition::text("lastName", "Last Name").required(),
            FieldDefinition::number("age", "Age"),
        ],
    )
}

pub fn address_information() -> Result<Schema> {
    Schema::new(
        ADDRESS_INFORMATION,
        vec![
            FieldDefinition::text("street", "Street").required(),
            FieldDefinition::text("city", "City").required(),
            FieldDefinition::choice("state", "State", STATES.iter().copied())?.required(),
            FieldDefinition::text("zipCode", "Zip Code"),
        ],
    )
}

pub fn payment_information() -> Result<Schema> {
    Schema::new(
        PAYMENT_INFORMATION,
        vec![
            FieldDefinition::text("cardNumber", "Card Number").required(),
            FieldDefinition::date("expiryDate", "Expiry Date").required(),
            FieldDefinition::password("cvv", "CVV").required(),
            FieldDefinition::text("cardholderName", "Cardholder Name").required(),
        ],
    )
}
