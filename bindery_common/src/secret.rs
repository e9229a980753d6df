use std::fmt::{self, Debug, Display};

/// An API credential (a consumer secret, an LWA token) that must never leak into logs. Both `Debug` and `Display`
/// render a mask, including through the derived `Debug` of any config struct that carries one; [`Secret::reveal`]
/// hands out the raw value at the single point where it goes onto the wire.
#[derive(Clone, Default)]
pub struct Secret(String);

impl Secret {
    pub fn new<S: Into<String>>(credential: S) -> Self {
        Self(credential.into())
    }

    /// The raw credential. Keep the result out of log statements.
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}
