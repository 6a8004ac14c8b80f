//! Memory ballast: a heap buffer that is fully written so it becomes resident.

use std::hint::black_box;

use thiserror::Error;

pub const MIB: usize = 1024 * 1024;

/// Default ballast size, 100 MiB.
pub const DEFAULT_SIZE_BYTES: usize = 100 * MIB;

#[derive(Debug, Error)]
pub enum BallastError {
    #[error("ballast size must be greater than zero")]
    EmptySize,

    #[error("cannot allocate ballast of {size} bytes")]
    Alloc {
        size: usize,
        #[source]
        source: std::collections::TryReserveError,
    },
}

pub struct Ballast {
    buf: Box<[u8]>,
}

impl Ballast {
    /// Allocates `size` bytes and writes `index % 256` into every byte.
    ///
    /// Writing every byte is what forces the kernel to commit the pages; a
    /// reservation alone would only grow the virtual size.
    pub fn allocate(size: usize) -> Result<Self, BallastError> {
        if size == 0 {
            return Err(BallastError::EmptySize);
        }

        let mut buf: Vec<u8> = Vec::new();
        buf.try_reserve_exact(size)
            .map_err(|source| BallastError::Alloc { size, source })?;

        // capacity je už rezervovaná, extend nerealokuje
        buf.extend((0..size).map(|i| (i % 256) as u8));

        Ok(Self {
            buf: black_box(buf).into_boxed_slice(),
        })
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[allow(dead_code)]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Re-checks that every byte still equals its index modulo 256.
    #[allow(dead_code)]
    pub fn is_patterned(&self) -> bool {
        self.buf
            .iter()
            .enumerate()
            .all(|(i, &b)| b == (i % 256) as u8)
    }
}

impl std::fmt::Debug for Ballast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ballast").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_index_modulo_256() {
        let ballast = Ballast::allocate(1000).unwrap();
        let bytes = ballast.as_slice();

        assert_eq!(ballast.len(), 1000);
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[255], 255);
        assert_eq!(bytes[256], 0);
        assert_eq!(bytes[999], (999 % 256) as u8);
        assert!(ballast.is_patterned());
    }

    #[test]
    fn default_size_is_fully_populated() {
        let ballast = Ballast::allocate(DEFAULT_SIZE_BYTES).unwrap();

        assert_eq!(ballast.len(), 104_857_600);
        assert_eq!(ballast.as_slice()[DEFAULT_SIZE_BYTES - 1], 255);
        assert!(ballast.is_patterned());
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = Ballast::allocate(0).unwrap_err();
        assert!(matches!(err, BallastError::EmptySize));
    }

    #[test]
    fn impossible_size_reports_alloc_error() {
        let err = Ballast::allocate(usize::MAX).unwrap_err();
        match err {
            BallastError::Alloc { size, .. } => assert_eq!(size, usize::MAX),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
