//! The [`WindModel`] trait, the [`WindKind`] selector and the factory.
//!
//! Wind laws are stateless operators: they read a [`DiskSnapshot`] and
//! write a [`WindCoefficients`] triple owned by the caller. Holding no
//! back-reference to the disk means a law can never outlive or mutate it.

use std::fmt;
use std::str::FromStr;

use accrete_core::DiskSnapshot;
use smallvec::SmallVec;

use crate::cambier2013::Cambier2013Wind;
use crate::coefficients::WindCoefficients;
use crate::error::WindError;
use crate::shields1986::Shields1986Wind;
use crate::ss73c::Ss73cWind;
use crate::test_laws::{TestAWind, TestBWind, TestCWind};

/// Positional parameter list of a wind law.
pub type WindParams = SmallVec<[f64; 4]>;

/// A wind-torque law.
///
/// # Contract
///
/// - `update()` MUST overwrite every node of `out`; the caller does not
///   zero it first.
/// - `update()` MUST be deterministic in the snapshot.
/// - Laws with `is_dynamic() == false` depend on the grid only and are
///   evaluated once per run.
///
/// # Examples
///
/// ```
/// use accrete_core::DiskSnapshot;
/// use accrete_wind::{WindCoefficients, WindModel};
///
/// struct UniformSink(f64);
///
/// impl WindModel for UniformSink {
///     fn name(&self) -> &str { "uniform_sink" }
///
///     fn update(&self, disk: &dyn DiskSnapshot, out: &mut WindCoefficients) {
///         out.clear(disk.grid().len());
///         out.c.fill(-self.0);
///     }
/// }
///
/// assert_eq!(UniformSink(1.0).name(), "uniform_sink");
/// assert!(!UniformSink(1.0).is_dynamic());
/// ```
pub trait WindModel: Send + Sync + 'static {
    /// Human-readable name for logging and errors.
    fn name(&self) -> &str;

    /// Whether the coefficients depend on the evolving torque field.
    fn is_dynamic(&self) -> bool {
        false
    }

    /// Recompute `(A, B, C)` from the current disk.
    fn update(&self, disk: &dyn DiskSnapshot, out: &mut WindCoefficients);
}

/// The absence of a wind: `A = B = C = 0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoWind;

impl WindModel for NoWind {
    fn name(&self) -> &str {
        "no"
    }

    fn update(&self, disk: &dyn DiskSnapshot, out: &mut WindCoefficients) {
        out.clear(disk.grid().len());
    }
}

/// Selector for the built-in wind laws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WindKind {
    /// [`NoWind`].
    #[default]
    No,
    /// [`Ss73cWind`].
    Ss73c,
    /// [`Cambier2013Wind`].
    Cambier2013,
    /// [`TestAWind`].
    TestA,
    /// [`TestBWind`].
    TestB,
    /// [`TestCWind`].
    TestC,
    /// [`Shields1986Wind`].
    TestCQ0Shields1986,
}

impl WindKind {
    /// Selector text accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Ss73c => "SS73C",
            Self::Cambier2013 => "Cambier2013",
            Self::TestA => "testA",
            Self::TestB => "testB",
            Self::TestC => "testC",
            Self::TestCQ0Shields1986 => "testC_q0_Shields1986",
        }
    }
}

impl FromStr for WindKind {
    type Err = WindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::No,
            Self::Ss73c,
            Self::Cambier2013,
            Self::TestA,
            Self::TestB,
            Self::TestC,
            Self::TestCQ0Shields1986,
        ]
        .into_iter()
        .find(|k| k.as_str() == s)
        .ok_or_else(|| WindError::UnknownKind {
            name: s.to_string(),
        })
    }
}

impl fmt::Display for WindKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the law named by `kind` from its positional parameters.
///
/// Parameters beyond those a law uses are ignored.
pub fn build_wind(kind: WindKind, params: &[f64]) -> Result<Box<dyn WindModel>, WindError> {
    let name = kind.as_str();
    let param = |index: usize, parameter: &'static str| -> Result<f64, WindError> {
        let value = *params
            .get(index)
            .ok_or(WindError::MissingParameter {
                wind: name,
                parameter,
            })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(WindError::InvalidParameter {
                wind: name,
                parameter,
                value,
            })
        }
    };

    Ok(match kind {
        WindKind::No => Box::new(NoWind),
        WindKind::Ss73c => Box::new(Ss73cWind::new(param(0, "k")?)),
        WindKind::Cambier2013 => Box::new(Cambier2013Wind::new(
            param(0, "kC")?,
            param(1, "R_IC2out")?,
        )?),
        WindKind::TestA => Box::new(TestAWind::new(param(0, "kA")?)),
        WindKind::TestB => Box::new(TestBWind::new(param(0, "kB")?)),
        WindKind::TestC => Box::new(TestCWind::new(param(0, "kC")?)),
        WindKind::TestCQ0Shields1986 => Box::new(Shields1986Wind::new(
            param(0, "kC")?,
            param(1, "R_windmin2out")?,
        )?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrete_test_utils::fixtures::physical_grid;
    use accrete_test_utils::MockDisk;
    use proptest::prelude::*;

    #[test]
    fn every_selector_round_trips() {
        for s in [
            "no",
            "SS73C",
            "Cambier2013",
            "testA",
            "testB",
            "testC",
            "testC_q0_Shields1986",
        ] {
            assert_eq!(s.parse::<WindKind>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn unknown_selector_is_rejected() {
        assert_eq!(
            "Woods1996".parse::<WindKind>(),
            Err(WindError::UnknownKind {
                name: "Woods1996".into()
            })
        );
    }

    #[test]
    fn missing_parameter_is_named() {
        let err = build_wind(WindKind::Cambier2013, &[1.0]).err().unwrap();
        assert_eq!(
            err,
            WindError::MissingParameter {
                wind: "Cambier2013",
                parameter: "R_IC2out",
            }
        );
    }

    #[test]
    fn non_finite_parameter_is_rejected() {
        assert!(matches!(
            build_wind(WindKind::Ss73c, &[f64::NAN]),
            Err(WindError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn no_wind_zeroes_stale_coefficients() {
        let disk = MockDisk::uniform(10);
        let mut out = WindCoefficients::zeros(10);
        out.a[3] = 1.0;
        NoWind.update(&disk, &mut out);
        assert!(out.is_zero());
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn factory_names_match_selectors() {
        let cases: [(WindKind, &[f64]); 4] = [
            (WindKind::No, &[]),
            (WindKind::Ss73c, &[0.1]),
            (WindKind::TestB, &[0.5]),
            (WindKind::TestCQ0Shields1986, &[1e17, 0.1]),
        ];
        for (kind, params) in cases {
            assert_eq!(build_wind(kind, params).unwrap().name(), kind.as_str());
        }
    }

    proptest! {
        #[test]
        fn every_law_overwrites_all_nodes_deterministically(
            nx in 8usize..200,
            k in 0.0f64..2.0,
            ratio in 0.05f64..0.95,
            mdot_in in -1.0e18f64..1.0e18,
            trim in 0usize..4,
        ) {
            let grid = physical_grid(nx);
            let f: Vec<f64> = grid.h().iter().map(|h| 1e30 * h).collect();
            let disk = MockDisk::new(grid, f)
                .with_range(0, nx - 1 - trim)
                .with_mdot_in(mdot_in);
            let cases: [(WindKind, &[f64]); 7] = [
                (WindKind::No, &[]),
                (WindKind::Ss73c, &[k]),
                (WindKind::Cambier2013, &[k, ratio]),
                (WindKind::TestA, &[k]),
                (WindKind::TestB, &[k]),
                (WindKind::TestC, &[k * 1e17]),
                (WindKind::TestCQ0Shields1986, &[k, ratio]),
            ];
            for (kind, params) in cases {
                let law = build_wind(kind, params).unwrap();
                let mut first = WindCoefficients::zeros(nx + 3);
                first.a.fill(f64::NAN);
                first.c.fill(f64::NAN);
                law.update(&disk, &mut first);
                prop_assert_eq!(first.len(), nx);
                prop_assert!(first.a.iter().chain(&first.b).chain(&first.c).all(|x| x.is_finite()));

                let mut second = WindCoefficients::zeros(1);
                law.update(&disk, &mut second);
                prop_assert_eq!(&first, &second);
            }
        }
    }
}
