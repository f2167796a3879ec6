//! Fixture table: element types, shapes and the output folder

use std::fmt;
use std::path::PathBuf;

/// Value every integer fixture sums to (negated for signed types)
pub const TARGET_SUM: u64 = 42;

/// Default destination folder for generated fixtures
pub const DEFAULT_OUTPUT_DIR: &str = "test/data";

/// Element types covered by the fixture set
pub const ELEMENT_TYPES: [ElementType; 8] = [
    ElementType::Int8,
    ElementType::UInt8,
    ElementType::Int16,
    ElementType::UInt16,
    ElementType::Int32,
    ElementType::UInt32,
    ElementType::Float32,
    ElementType::Float64,
];

/// Shapes covered by the fixture set
pub const SHAPES: [&[usize]; 5] = [&[1], &[4], &[1, 4], &[4, 4], &[4, 4, 4]];

/// Classification that decides which invariant a sample satisfies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Sums to `-TARGET_SUM`
    SignedInteger,
    /// Sums to `TARGET_SUM`
    UnsignedInteger,
    /// Unit L2 norm
    Float,
}

/// Numeric storage kind of a fixture's elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    Float64,
}

impl ElementType {
    /// Canonical lowercase name, as used in fixture file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Int8 | Self::Int16 | Self::Int32 => ElementKind::SignedInteger,
            Self::UInt8 | Self::UInt16 | Self::UInt32 => ElementKind::UnsignedInteger,
            Self::Float32 | Self::Float64 => ElementKind::Float,
        }
    }

    pub fn bits(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 8,
            Self::Int16 | Self::UInt16 => 16,
            Self::Int32 | Self::UInt32 | Self::Float32 => 32,
            Self::Float64 => 64,
        }
    }

    /// Size of one element in bytes
    pub fn size_bytes(&self) -> usize {
        self.bits() / 8
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Array dimensions, rendered like a Python tuple: `(1,)`, `(4, 4)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape(Vec<usize>);

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Self(dims)
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Number of elements an array of this shape holds
    pub fn num_elements(&self) -> usize {
        self.0.iter().product()
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self(dims.to_vec())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "({},)", single),
            dims => {
                let parts: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

/// One (element type, shape) combination
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureSpec {
    pub dtype: ElementType,
    pub shape: Shape,
}

impl FixtureSpec {
    pub fn new(dtype: ElementType, shape: Shape) -> Self {
        Self { dtype, shape }
    }

    pub fn num_elements(&self) -> usize {
        self.shape.num_elements()
    }

    /// Size of the raw element data in bytes, header excluded
    pub fn size_bytes(&self) -> usize {
        self.num_elements() * self.dtype.size_bytes()
    }

    /// File name, e.g. `uint8-(4,).npy`
    pub fn file_name(&self) -> String {
        format!("{}-{}.npy", self.dtype, self.shape)
    }
}

/// The knobs of a generation run
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    pub element_types: Vec<ElementType>,
    pub shapes: Vec<Shape>,
    pub output_dir: PathBuf,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            element_types: ELEMENT_TYPES.to_vec(),
            shapes: SHAPES.iter().map(|&dims| Shape::from(dims)).collect(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl FixtureConfig {
    /// Override the destination folder
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Cartesian product of element types and shapes, type-major
    pub fn fixtures(&self) -> Vec<FixtureSpec> {
        let shapes = &self.shapes;
        self.element_types
            .iter()
            .flat_map(|&dtype| {
                shapes
                    .iter()
                    .map(move |shape| FixtureSpec::new(dtype, shape.clone()))
            })
            .collect()
    }
}
