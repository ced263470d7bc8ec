// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum length for olympiad, event, player, and team names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Validates a display name for an olympiad, event, player, or team.
///
/// This function checks shape only. Uniqueness requires context and is
/// enforced by the persistence layer.
///
/// # Arguments
///
/// * `name` - The name to validate
///
/// # Errors
///
/// Returns an error if the name is blank after trimming or exceeds
/// `MAX_NAME_LENGTH` characters.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    let trimmed: &str = name.trim();

    // Rule: name must not be blank
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "name must not be blank",
        )));
    }

    // Rule: name must fit in the display column
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName(format!(
            "name must not exceed {MAX_NAME_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Validates the shape of a stage declaration.
///
/// # Arguments
///
/// * `stage_order` - The 1-based position in the stage sequence
/// * `advance_count` - How many participants exit the stage, if any
///
/// # Errors
///
/// Returns an error if the stage order is not positive, or if an advance
/// count is present but not positive.
pub fn validate_stage_declaration(
    stage_order: i64,
    advance_count: Option<i64>,
) -> Result<(), DomainError> {
    if stage_order < 1 {
        return Err(DomainError::InvalidStageOrder(stage_order));
    }

    if let Some(count) = advance_count {
        if count < 1 {
            return Err(DomainError::InvalidAdvanceCount(count));
        }
    }

    Ok(())
}
