use crate::error::AnalysisError;
use std::{fmt, str::FromStr};

/// Identifier of a single float profile.
///
/// The data service names profiles by platform (WMO number) and cycle,
/// rendered as `platform_cycle`, e.g. `5904912_239`. The same composite is
/// used here as a value object so groups of profiles can be keyed without
/// resorting to raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProfileId {
    platform: u32,
    cycle: u32,
}

impl ProfileId {
    /// Create an id from a platform number and a cycle number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argo_colocation::ProfileId;
    ///
    /// let id = ProfileId::new(5904912, 239);
    /// assert_eq!(id.to_string(), "5904912_239");
    /// ```
    #[inline]
    pub fn new(platform: u32, cycle: u32) -> Self {
        ProfileId { platform, cycle }
    }

    /// The platform (float) WMO number.
    #[inline]
    pub fn platform(self) -> u32 {
        self.platform
    }

    /// The cycle number, increasing over the platform's lifetime.
    #[inline]
    pub fn cycle(self) -> u32 {
        self.cycle
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_{}", self.platform, self.cycle)
    }
}

impl FromStr for ProfileId {
    type Err = AnalysisError;

    /// Parse the service's `platform_cycle` form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argo_colocation::ProfileId;
    ///
    /// let id: ProfileId = "5904912_239".parse().unwrap();
    /// assert_eq!(id.platform(), 5904912);
    /// assert_eq!(id.cycle(), 239);
    ///
    /// assert!("5904912".parse::<ProfileId>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AnalysisError::InvalidProfileId(s.to_owned());

        let mut parts = s.splitn(2, '_');
        let platform = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let cycle = parts
            .next()
            .and_then(|c| c.parse().ok())
            .ok_or_else(invalid)?;

        Ok(ProfileId { platform, cycle })
    }
}
