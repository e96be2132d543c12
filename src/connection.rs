use std::ops::Deref;

use tracing::debug;

use crate::tag::{Connectable, TagIoError};

/// An open connection to a tag technology, closed when dropped
pub(crate) struct Connection<'a, C: Connectable + ?Sized> {
    tech: &'a C,
}

impl<'a, C: Connectable + ?Sized> Connection<'a, C> {
    /// Connect, closing again straight away if connecting fails
    pub fn open(tech: &'a C) -> Result<Self, TagIoError> {
        if let Err(error) = tech.connect() {
            close_quietly(tech);
            return Err(error);
        }

        Ok(Self { tech })
    }
}

impl<C: Connectable + ?Sized> Deref for Connection<'_, C> {
    type Target = C;

    fn deref(&self) -> &Self::Target {
        self.tech
    }
}

impl<C: Connectable + ?Sized> Drop for Connection<'_, C> {
    fn drop(&mut self) {
        close_quietly(self.tech);
    }
}

fn close_quietly<C: Connectable + ?Sized>(tech: &C) {
    if let Err(error) = tech.close() {
        debug!("ignoring error closing tag connection: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mock::MockNdef, tag::NdefTech as _};

    #[test]
    fn closes_when_dropped() {
        let ndef = MockNdef::new();
        {
            let connection = Connection::open(&ndef).unwrap();
            assert!(connection.is_writable());
            assert_eq!(ndef.closes(), 0);
        }

        assert_eq!(ndef.connects(), 1);
        assert_eq!(ndef.closes(), 1);
    }

    #[test]
    fn closes_when_connect_fails() {
        let ndef = MockNdef::new().fail_connect(TagIoError::Stale);
        assert!(Connection::open(&ndef).is_err());
        assert_eq!(ndef.closes(), 1);
    }
}
