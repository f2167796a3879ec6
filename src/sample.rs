//! Sample array synthesis

use crate::config::{ElementKind, ElementType, FixtureSpec, TARGET_SUM};
use crate::error::{FixtureError, Result};
use ndarray::{ArrayD, IxDyn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal, Uniform};

/// A dense row-major array holding one fixture's values
#[derive(Debug, Clone, PartialEq)]
pub enum SampleArray {
    Int8(ArrayD<i8>),
    UInt8(ArrayD<u8>),
    Int16(ArrayD<i16>),
    UInt16(ArrayD<u16>),
    Int32(ArrayD<i32>),
    UInt32(ArrayD<u32>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
}

impl SampleArray {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Int8(_) => ElementType::Int8,
            Self::UInt8(_) => ElementType::UInt8,
            Self::Int16(_) => ElementType::Int16,
            Self::UInt16(_) => ElementType::UInt16,
            Self::Int32(_) => ElementType::Int32,
            Self::UInt32(_) => ElementType::UInt32,
            Self::Float32(_) => ElementType::Float32,
            Self::Float64(_) => ElementType::Float64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Int8(a) => a.shape(),
            Self::UInt8(a) => a.shape(),
            Self::Int16(a) => a.shape(),
            Self::UInt16(a) => a.shape(),
            Self::Int32(a) => a.shape(),
            Self::UInt32(a) => a.shape(),
            Self::Float32(a) => a.shape(),
            Self::Float64(a) => a.shape(),
        }
    }

    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check element type and shape against the fixture it was generated for
    pub fn validate(&self, spec: &FixtureSpec) -> Result<()> {
        if self.element_type() != spec.dtype {
            return Err(FixtureError::validation(format!(
                "fixture '{}' holds {} elements",
                spec.file_name(),
                self.element_type()
            )));
        }

        if self.shape() != spec.shape.dims() {
            return Err(FixtureError::validation(format!(
                "fixture '{}' shape mismatch: expected {:?}, got {:?}",
                spec.file_name(),
                spec.shape.dims(),
                self.shape()
            )));
        }

        Ok(())
    }
}

/// Sample generator trait
pub trait SampleGenerator: Send + Sync {
    /// Generate the sample array for the given fixture
    fn generate(&mut self, spec: &FixtureSpec) -> Result<SampleArray>;

    /// Set the random seed
    fn set_seed(&mut self, seed: u64);
}

/// Random generator producing arrays with a checkable structure:
/// unit-norm floats, or integers summing to +/-42
pub struct RandomSampleGenerator {
    rng: StdRng,
}

impl RandomSampleGenerator {
    /// Create a new generator, seeded from entropy when `seed` is `None`
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Standard-normal values rescaled to unit L2 norm
    pub fn unit_norm(&mut self, num_elements: usize) -> Result<Vec<f64>> {
        if num_elements == 0 {
            return Err(FixtureError::synthesis(
                "cannot normalize an array with no elements",
            ));
        }

        let mut values: Vec<f64> = Vec::with_capacity(num_elements);
        for _ in 0..num_elements {
            let value: f64 = StandardNormal.sample(&mut self.rng);
            values.push(value);
        }

        let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Err(FixtureError::synthesis("drew an all-zero vector"));
        }

        for value in &mut values {
            *value /= norm;
        }

        Ok(values)
    }

    /// Multinomial draw of `total` trials over `parts` equally likely bins
    pub fn composition(&mut self, total: u64, parts: usize) -> Result<Vec<u64>> {
        if parts == 0 {
            return Err(FixtureError::synthesis(format!(
                "cannot split {} into zero parts",
                total
            )));
        }

        let bins = Uniform::new(0, parts);
        let mut counts = vec![0u64; parts];
        for _ in 0..total {
            counts[bins.sample(&mut self.rng)] += 1;
        }

        Ok(counts)
    }

    /// Composition of `TARGET_SUM`, negated for signed element types
    fn signed_composition(&mut self, spec: &FixtureSpec) -> Result<Vec<i64>> {
        let counts = self.composition(TARGET_SUM, spec.num_elements())?;
        let sign = match spec.dtype.kind() {
            ElementKind::SignedInteger => -1,
            _ => 1,
        };
        Ok(counts.into_iter().map(|c| sign * c as i64).collect())
    }
}

fn shaped<T>(spec: &FixtureSpec, values: Vec<T>) -> Result<ArrayD<T>> {
    Ok(ArrayD::from_shape_vec(IxDyn(spec.shape.dims()), values)?)
}

impl SampleGenerator for RandomSampleGenerator {
    fn generate(&mut self, spec: &FixtureSpec) -> Result<SampleArray> {
        let sample = match spec.dtype.kind() {
            ElementKind::Float => {
                let values = self.unit_norm(spec.num_elements())?;
                match spec.dtype {
                    ElementType::Float32 => SampleArray::Float32(shaped(
                        spec,
                        values.into_iter().map(|v| v as f32).collect(),
                    )?),
                    _ => SampleArray::Float64(shaped(spec, values)?),
                }
            }
            ElementKind::SignedInteger | ElementKind::UnsignedInteger => {
                let values = self.signed_composition(spec)?;
                let values = values.into_iter();
                match spec.dtype {
                    ElementType::Int8 => {
                        SampleArray::Int8(shaped(spec, values.map(|v| v as i8).collect())?)
                    }
                    ElementType::UInt8 => {
                        SampleArray::UInt8(shaped(spec, values.map(|v| v as u8).collect())?)
                    }
                    ElementType::Int16 => {
                        SampleArray::Int16(shaped(spec, values.map(|v| v as i16).collect())?)
                    }
                    ElementType::UInt16 => {
                        SampleArray::UInt16(shaped(spec, values.map(|v| v as u16).collect())?)
                    }
                    ElementType::Int32 => {
                        SampleArray::Int32(shaped(spec, values.map(|v| v as i32).collect())?)
                    }
                    ElementType::UInt32 => {
                        SampleArray::UInt32(shaped(spec, values.map(|v| v as u32).collect())?)
                    }
                    other => {
                        return Err(FixtureError::synthesis(format!(
                            "{} is not an integer type",
                            other
                        )))
                    }
                }
            }
        };

        sample.validate(spec)?;
        Ok(sample)
    }

    fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Shape;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_norm() {
        let mut gen = RandomSampleGenerator::new(Some(42));
        let values = gen.unit_norm(64).unwrap();
        let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert_relative_eq!(norm, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_element_has_unit_magnitude() {
        let mut gen = RandomSampleGenerator::new(Some(7));
        let values = gen.unit_norm(1).unwrap();
        assert_eq!(values.len(), 1);
        assert_relative_eq!(values[0].abs(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_composition_sums_to_total() {
        let mut gen = RandomSampleGenerator::new(Some(1));
        let counts = gen.composition(42, 16).unwrap();
        assert_eq!(counts.len(), 16);
        assert_eq!(counts.iter().sum::<u64>(), 42);
    }

    #[test]
    fn test_zero_parts_is_an_error() {
        let mut gen = RandomSampleGenerator::new(Some(1));
        assert!(gen.composition(42, 0).is_err());
        assert!(gen.unit_norm(0).is_err());
    }

    #[test]
    fn test_signed_sample_is_negated() {
        let mut gen = RandomSampleGenerator::new(Some(3));
        let spec = FixtureSpec::new(ElementType::Int16, Shape::new(vec![4, 4]));

        match gen.generate(&spec).unwrap() {
            SampleArray::Int16(array) => {
                assert_eq!(array.shape(), &[4, 4]);
                assert!(array.iter().all(|&v| v <= 0));
                assert_eq!(array.iter().map(|&v| v as i64).sum::<i64>(), -42);
            }
            other => panic!("unexpected sample type: {:?}", other.element_type()),
        }
    }

    #[test]
    fn test_validation_rejects_wrong_shape() {
        let spec = FixtureSpec::new(ElementType::UInt8, Shape::new(vec![4]));
        let sample = SampleArray::UInt8(ArrayD::zeros(IxDyn(&[1, 4])));
        assert!(sample.validate(&spec).is_err());

        let sample = SampleArray::Int8(ArrayD::zeros(IxDyn(&[4])));
        assert!(sample.validate(&spec).is_err());
    }
}
