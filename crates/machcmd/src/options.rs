//! Read configuration.
//!
//! Producers pad every load command to a multiple of the pointer width.
//! Reading accepts records that are not padded unless strict alignment is
//! requested here.

use crate::{Error, Result};

/// Pointer width of 64-bit images, and the default alignment.
pub const DEFAULT_ALIGNMENT: u32 = 8;

/// Options controlling how load commands are read.
///
/// # Example
///
/// ```
/// use machcmd::ReadOptions;
///
/// let options = ReadOptions::new().strict_alignment(true).alignment(4);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    strict_alignment: bool,
    alignment: u32,
}

impl ReadOptions {
    /// Create lenient options with 8-byte alignment.
    pub fn new() -> Self {
        Self {
            strict_alignment: false,
            alignment: DEFAULT_ALIGNMENT,
        }
    }

    /// Reject records whose `cmdsize` is not a multiple of the alignment.
    pub fn strict_alignment(mut self, strict: bool) -> Self {
        self.strict_alignment = strict;
        self
    }

    /// Set the alignment checked in strict mode.
    ///
    /// Images set this from their header: 8 for 64-bit, 4 for 32-bit.
    pub fn alignment(mut self, alignment: u32) -> Self {
        self.alignment = alignment;
        self
    }

    /// Whether strict alignment is enabled.
    pub fn is_strict(&self) -> bool {
        self.strict_alignment
    }

    /// The alignment checked in strict mode.
    pub fn required_alignment(&self) -> u32 {
        self.alignment
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the alignment is zero or not a power of two.
    pub fn validate(&self) -> Result<()> {
        if !self.alignment.is_power_of_two() {
            return Err(Error::Config(format!(
                "Alignment must be a power of two, got {}",
                self.alignment
            )));
        }
        Ok(())
    }

    /// Check a record size against these options.
    pub(crate) fn check_size(&self, cmd: u32, cmdsize: u32) -> Result<()> {
        if self.strict_alignment && cmdsize % self.alignment != 0 {
            return Err(Error::MisalignedRecord {
                cmd,
                cmdsize,
                alignment: self.alignment,
            });
        }
        Ok(())
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_lenient() {
        let options = ReadOptions::default();
        assert!(!options.is_strict());
        assert_eq!(options.required_alignment(), 8);
        assert!(options.check_size(0x1b, 13).is_ok());
    }

    #[test]
    fn test_strict_rejects_misaligned() {
        let options = ReadOptions::new().strict_alignment(true);
        assert!(options.check_size(0x1b, 24).is_ok());
        assert!(matches!(
            options.check_size(0x1b, 28),
            Err(Error::MisalignedRecord { alignment: 8, .. })
        ));

        let options = options.alignment(4);
        assert!(options.check_size(0x1b, 28).is_ok());
    }

    #[test]
    fn test_validate_alignment() {
        assert!(ReadOptions::new().alignment(0).validate().is_err());
        assert!(ReadOptions::new().alignment(12).validate().is_err());
        assert!(ReadOptions::new().alignment(16).validate().is_ok());
    }
}
