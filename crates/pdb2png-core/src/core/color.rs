use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default palette cycled across protein chains.
pub const DEFAULT_PROTEIN_COLORS: [f64; 9] = [0.8, 0.8, 0.6, 0.8, 0.6, 0.8, 0.6, 0.8, 0.8];

/// Default palette cycled across heteroatom groups.
pub const DEFAULT_HETATM_COLORS: [f64; 9] = [0.15, 0.7, 0.9, 0.9, 0.75, 0.15, 0.9, 0.15, 0.75];

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorError {
    #[error("Color name cannot be empty")]
    EmptyName,

    #[error("Invalid color component '{value}': expected a number")]
    InvalidComponent { value: String },

    #[error("Color component {value} must be finite and non-negative")]
    OutOfRange { value: f64 },

    #[error("Color palette cannot be empty")]
    EmptyPalette,

    #[error("Color palette must hold whole RGB triples, got {len} values")]
    IncompleteTriple { len: usize },
}

/// A single RGB triple as understood by the rendering engine.
///
/// Components in `0..=1` are fractions; the engine reads components above 1
/// as 0-255 byte values, so both conventions are passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Result<Self, ColorError> {
        for value in [r, g, b] {
            if !value.is_finite() || value < 0.0 {
                return Err(ColorError::OutOfRange { value });
            }
        }
        Ok(Self { r, g, b })
    }

    pub fn components(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// An ordered, non-empty list of RGB triples cycled round robin across entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Builds a palette from a flat list of components grouped in threes.
    pub fn from_flat(values: &[f64]) -> Result<Self, ColorError> {
        if values.is_empty() {
            return Err(ColorError::EmptyPalette);
        }
        if values.len() % 3 != 0 {
            return Err(ColorError::IncompleteTriple { len: values.len() });
        }
        let colors = values
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { colors })
    }

    fn from_constant<const N: usize>(values: &[f64; N]) -> Self {
        let colors = values
            .chunks_exact(3)
            .map(|c| Rgb {
                r: c[0],
                g: c[1],
                b: c[2],
            })
            .collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn first(&self) -> Rgb {
        self.colors[0]
    }

    /// Flat component view, the shape the palette was parsed from.
    pub fn flat(&self) -> Vec<f64> {
        self.colors.iter().flat_map(|c| c.components()).collect()
    }

    /// Endless round-robin iterator: the n-th item is the triple starting at
    /// flat index `(3 * n) mod flat_len`.
    pub fn cycle(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.colors.iter().copied().cycle()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    /// A color the engine knows by name (e.g. `red`, `grey50`), applied uniformly.
    Named(String),
    /// A palette cycled across entities.
    Palette(Palette),
}

impl ColorSpec {
    pub fn named(name: impl Into<String>) -> Result<Self, ColorError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ColorError::EmptyName);
        }
        Ok(ColorSpec::Named(trimmed.to_string()))
    }

    pub fn palette(values: &[f64]) -> Result<Self, ColorError> {
        Palette::from_flat(values).map(ColorSpec::Palette)
    }

    pub fn default_protein() -> Self {
        ColorSpec::Palette(Palette::from_constant(&DEFAULT_PROTEIN_COLORS))
    }

    pub fn default_hetatm() -> Self {
        ColorSpec::Palette(Palette::from_constant(&DEFAULT_HETATM_COLORS))
    }
}

impl FromStr for ColorSpec {
    type Err = ColorError;

    /// A string containing a comma is a flat component list (`1,0,0,0,1,0`);
    /// anything else is a color name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.contains(',') {
            return ColorSpec::named(s);
        }
        let values = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>().map_err(|_| ColorError::InvalidComponent {
                    value: part.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        ColorSpec::palette(&values)
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSpec::Named(name) => write!(f, "{}", name),
            ColorSpec::Palette(palette) => {
                let parts: Vec<String> = palette.flat().iter().map(|v| v.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}
