use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bond order string: '{0}'")]
pub struct ParseBondOrderError(String);

macro_rules! periodic_table {
    ($($symbol:ident = $z:literal),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Element {
            $($symbol = $z),+
        }

        impl Element {
            pub fn symbol(&self) -> &'static str {
                match self {
                    $(Element::$symbol => stringify!($symbol)),+
                }
            }

            pub fn from_atomic_number(z: u8) -> Option<Self> {
                match z {
                    $($z => Some(Element::$symbol),)+
                    _ => None,
                }
            }
        }

        impl FromStr for Element {
            type Err = ParseElementError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($symbol) => Ok(Element::$symbol),)+
                    _ => Err(ParseElementError(s.to_string())),
                }
            }
        }
    };
}

periodic_table! {
    H = 1, He = 2,
    Li = 3, Be = 4, B = 5, C = 6, N = 7, O = 8, F = 9, Ne = 10,
    Na = 11, Mg = 12, Al = 13, Si = 14, P = 15, S = 16, Cl = 17, Ar = 18,
    K = 19, Ca = 20, Sc = 21, Ti = 22, V = 23, Cr = 24, Mn = 25, Fe = 26, Co = 27,
    Ni = 28, Cu = 29, Zn = 30, Ga = 31, Ge = 32, As = 33, Se = 34, Br = 35, Kr = 36,
    Rb = 37, Sr = 38, Y = 39, Zr = 40, Nb = 41, Mo = 42, Tc = 43, Ru = 44, Rh = 45,
    Pd = 46, Ag = 47, Cd = 48, In = 49, Sn = 50, Sb = 51, Te = 52, I = 53, Xe = 54,
    Cs = 55, Ba = 56, La = 57, Ce = 58, Pr = 59, Nd = 60, Pm = 61, Sm = 62, Eu = 63,
    Gd = 64, Tb = 65, Dy = 66, Ho = 67, Er = 68, Tm = 69, Yb = 70, Lu = 71,
    Hf = 72, Ta = 73, W = 74, Re = 75, Os = 76, Ir = 77, Pt = 78, Au = 79, Hg = 80,
    Tl = 81, Pb = 82, Bi = 83, Po = 84, At = 85, Rn = 86,
    Fr = 87, Ra = 88, Ac = 89, Th = 90, Pa = 91, U = 92, Np = 93, Pu = 94, Am = 95,
    Cm = 96, Bk = 97, Cf = 98, Es = 99, Fm = 100, Md = 101, No = 102, Lr = 103,
    Rf = 104, Db = 105, Sg = 106, Bh = 107, Hs = 108, Mt = 109, Ds = 110, Rg = 111,
    Cn = 112, Nh = 113, Fl = 114, Mc = 115, Lv = 116, Ts = 117, Og = 118,
}

impl Element {
    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    /// Number of electrons in the outermost shell.
    ///
    /// d- and f-block elements report their group-style count, which is
    /// only used as a rough lone-pair estimate during hybridization
    /// perception.
    pub fn valence_electrons(&self) -> u8 {
        let z = self.atomic_number();
        match z {
            1..=2 => z,
            3..=10 => z - 2,
            11..=18 => z - 10,
            19..=30 => z - 18,
            31..=36 => z - 28,
            37..=48 => z - 36,
            49..=54 => z - 46,
            55..=56 => z - 54,
            57..=71 => 3,
            72..=80 => z - 68,
            81..=86 => z - 78,
            87..=88 => z - 86,
            _ => 3,
        }
    }

    /// Allowed valences for SMILES organic-subset atoms, lowest first.
    ///
    /// Empty for every element outside the organic subset.
    pub fn default_valences(&self) -> &'static [u8] {
        match self {
            Element::B => &[3],
            Element::C => &[4],
            Element::N | Element::P => &[3, 5],
            Element::O => &[2],
            Element::S => &[2, 4, 6],
            Element::F | Element::Cl | Element::Br | Element::I => &[1],
            _ => &[],
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    pub fn value(&self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }

    #[inline]
    pub fn is_multiple(&self) -> bool {
        !matches!(self, BondOrder::Single)
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondOrder::Single => write!(f, "Single"),
            BondOrder::Double => write!(f, "Double"),
            BondOrder::Triple => write!(f, "Triple"),
            BondOrder::Aromatic => write!(f, "Aromatic"),
        }
    }
}

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "1" | "-" => Ok(BondOrder::Single),
            "double" | "2" | "=" => Ok(BondOrder::Double),
            "triple" | "3" | "#" => Ok(BondOrder::Triple),
            "aromatic" | "ar" | ":" => Ok(BondOrder::Aromatic),
            _ => Err(ParseBondOrderError(s.to_string())),
        }
    }
}

/// Orbital hybridization class of an atom.
///
/// The discriminants are the ordinals written into atom feature vectors and
/// must stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Hybridization {
    #[default]
    Unspecified = 0,
    S = 1,
    SP = 2,
    SP2 = 3,
    SP3 = 4,
    SP2D = 5,
    SP3D = 6,
    SP3D2 = 7,
    Other = 8,
}

impl Hybridization {
    #[inline]
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Hybridization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hybridization::Unspecified => "unspecified",
            Hybridization::S => "s",
            Hybridization::SP => "sp",
            Hybridization::SP2 => "sp2",
            Hybridization::SP3 => "sp3",
            Hybridization::SP2D => "sp2d",
            Hybridization::SP3D => "sp3d",
            Hybridization::SP3D2 => "sp3d2",
            Hybridization::Other => "other",
        };
        write!(f, "{name}")
    }
}
