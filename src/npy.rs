//! `.npy` export of sample arrays
//!
//! Files use format version 1.0: magic string, a header dict recording the
//! dtype descriptor, `fortran_order: False` and the shape, then the raw
//! little-endian elements in row-major order.

use crate::error::Result;
use crate::sample::SampleArray;
use ndarray_npy::write_npy;
use std::path::Path;

/// Write `sample` to `path`, replacing any existing file
pub fn write_sample(path: impl AsRef<Path>, sample: &SampleArray) -> Result<()> {
    let path = path.as_ref();
    match sample {
        SampleArray::Int8(a) => write_npy(path, a)?,
        SampleArray::UInt8(a) => write_npy(path, a)?,
        SampleArray::Int16(a) => write_npy(path, a)?,
        SampleArray::UInt16(a) => write_npy(path, a)?,
        SampleArray::Int32(a) => write_npy(path, a)?,
        SampleArray::UInt32(a) => write_npy(path, a)?,
        SampleArray::Float32(a) => write_npy(path, a)?,
        SampleArray::Float64(a) => write_npy(path, a)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};
    use ndarray_npy::read_npy;
    use tempfile::tempdir;

    #[test]
    fn test_written_file_decodes_with_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("uint16-(1, 4).npy");

        let array = ArrayD::from_shape_vec(IxDyn(&[1, 4]), vec![10u16, 0, 30, 2]).unwrap();
        write_sample(&path, &SampleArray::UInt16(array.clone())).unwrap();

        let decoded: ArrayD<u16> = read_npy(&path).unwrap();
        assert_eq!(decoded, array);
    }

    #[test]
    fn test_file_starts_with_npy_magic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("int8-(1,).npy");

        let array = ArrayD::from_shape_vec(IxDyn(&[1]), vec![-42i8]).unwrap();
        write_sample(&path, &SampleArray::Int8(array)).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..6], b"\x93NUMPY");
        assert_eq!(bytes[6], 1);
        assert_eq!(*bytes.last().unwrap() as i8, -42);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("float64-(4,).npy");
        std::fs::write(&path, vec![0xffu8; 4096]).unwrap();

        let array = ArrayD::from_shape_vec(IxDyn(&[4]), vec![0.5f64; 4]).unwrap();
        write_sample(&path, &SampleArray::Float64(array.clone())).unwrap();

        let decoded: ArrayD<f64> = read_npy(&path).unwrap();
        assert_eq!(decoded, array);
        assert!(std::fs::metadata(&path).unwrap().len() < 4096);
    }
}
