// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::FormKind;

/// Rejected user input on a create form. Messages are the user-visible
/// Vietnamese strings rendered inline; a failed validation never stores a
/// partial record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingRequiredFields,
    MissingBuildingFields,
    PhoneTooShort,
    SocialIdWrongLength,
    IncompleteRoomType,
    PasswordTooShort,
    PasswordMismatch,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredFields => f.write_str("Vui lòng điền đầy đủ thông tin bắt buộc"),
            Self::MissingBuildingFields => {
                f.write_str("Vui lòng điền đầy đủ tên tòa nhà và địa chỉ")
            }
            Self::PhoneTooShort => f.write_str("Số điện thoại phải có ít nhất 10 số"),
            Self::SocialIdWrongLength => f.write_str("Số CCCD/CMND phải có đúng 12 số"),
            Self::IncompleteRoomType => {
                f.write_str("Vui lòng điền đầy đủ thông tin cho tất cả loại phòng")
            }
            Self::PasswordTooShort => f.write_str("Mật khẩu phải có ít nhất 6 ký tự"),
            Self::PasswordMismatch => f.write_str("Mật khẩu xác nhận không khớp"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

pub const MIN_PHONE_DIGITS: usize = 10;
pub const SOCIAL_ID_DIGITS: usize = 12;
pub const MIN_PASSWORD_CHARS: usize = 6;
pub const DEFAULT_SERVICE_FEE_DONG: i64 = 500_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantFormInput {
    pub name: String,
    pub phone: String,
    pub zalo: String,
    pub social_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTypeFormInput {
    pub name: String,
    pub room_count: i32,
    pub price_dong: i64,
    pub service_fee_dong: i64,
}

impl RoomTypeFormInput {
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            room_count: 0,
            price_dong: 0,
            service_fee_dong: DEFAULT_SERVICE_FEE_DONG,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingFormInput {
    pub name: String,
    pub address: String,
    pub room_types: Vec<RoomTypeFormInput>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPayload {
    Tenant(TenantFormInput),
    Building(BuildingFormInput),
}

impl FormPayload {
    pub fn kind(&self) -> FormKind {
        match self {
            Self::Tenant(_) => FormKind::Tenant,
            Self::Building(_) => FormKind::Building,
        }
    }

    pub fn blank_for(kind: FormKind) -> Self {
        match kind {
            FormKind::Tenant => Self::Tenant(TenantFormInput {
                name: String::new(),
                phone: String::new(),
                zalo: String::new(),
                social_id: String::new(),
            }),
            FormKind::Building => Self::Building(BuildingFormInput {
                name: String::new(),
                address: String::new(),
                room_types: vec![RoomTypeFormInput::blank()],
            }),
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        match self {
            Self::Tenant(tenant) => tenant.validate(),
            Self::Building(building) => building.validate(),
        }
    }
}

impl TenantFormInput {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty()
            || self.phone.trim().is_empty()
            || self.social_id.trim().is_empty()
        {
            return Err(ValidationError::MissingRequiredFields);
        }
        if digit_count(&self.phone) < MIN_PHONE_DIGITS {
            return Err(ValidationError::PhoneTooShort);
        }
        if digit_count(&self.social_id) != SOCIAL_ID_DIGITS {
            return Err(ValidationError::SocialIdWrongLength);
        }
        Ok(())
    }
}

impl BuildingFormInput {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() || self.address.trim().is_empty() {
            return Err(ValidationError::MissingBuildingFields);
        }
        if self.room_types.is_empty() {
            return Err(ValidationError::IncompleteRoomType);
        }
        for room_type in &self.room_types {
            if room_type.name.trim().is_empty()
                || room_type.room_count <= 0
                || room_type.price_dong <= 0
            {
                return Err(ValidationError::IncompleteRoomType);
            }
        }
        Ok(())
    }
}

/// Account-credential rules from the intake contract. No sign-in screens
/// exist; these are exposed for whatever front door eventually needs them.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_password_confirmation(password: &str, confirmation: &str) -> ValidationResult<()> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    validate_password(password)
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}
