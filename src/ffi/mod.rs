//! Raw METIS types and constants.
//!
//! With `metis-support` the declarations come from bindgen run over the
//! const-correct wrapper header, so read-only parameters appear as
//! `*const idx_t`/`*const real_t` and outputs as `*mut`. Without it only the
//! ABI-stable constants and the default 32-bit `Idx`/`Real` are available.

use std::os::raw::c_int;

#[cfg(feature = "metis-support")]
#[allow(
    non_upper_case_globals,
    non_camel_case_types,
    non_snake_case,
    dead_code,
    clippy::all
)]
pub mod bindings {
    include!(concat!(env!("OUT_DIR"), "/metis_bindings.rs"));
}

/// Integer type used by METIS (`idx_t`).
#[cfg(feature = "metis-support")]
pub type Idx = bindings::idx_t;
/// Floating-point type used by METIS (`real_t`).
#[cfg(feature = "metis-support")]
pub type Real = bindings::real_t;

/// Integer type used by METIS (`idx_t`).
#[cfg(not(feature = "metis-support"))]
pub type Idx = i32;
/// Floating-point type used by METIS (`real_t`).
#[cfg(not(feature = "metis-support"))]
pub type Real = f32;

/// Generated bindings text, for auditing pointer mutability.
#[cfg(feature = "metis-support")]
pub const BINDINGS_SOURCE: &str = include_str!(concat!(env!("OUT_DIR"), "/metis_bindings.rs"));

#[cfg(target_pointer_width = "16")]
compile_error!("METIS does not support 16-bit architectures");

/// Length of the options array.
pub const NOPTIONS: usize = 40;

pub const METIS_OK: c_int = 1;
pub const METIS_ERROR_INPUT: c_int = -2;
pub const METIS_ERROR_MEMORY: c_int = -3;
pub const METIS_ERROR: c_int = -4;

// moptions_et
pub const OPTION_PTYPE: usize = 0;
pub const OPTION_OBJTYPE: usize = 1;
pub const OPTION_CTYPE: usize = 2;
pub const OPTION_IPTYPE: usize = 3;
pub const OPTION_RTYPE: usize = 4;
pub const OPTION_DBGLVL: usize = 5;
pub const OPTION_NITER: usize = 6;
pub const OPTION_NCUTS: usize = 7;
pub const OPTION_SEED: usize = 8;
pub const OPTION_NO2HOP: usize = 9;
pub const OPTION_MINCONN: usize = 10;
pub const OPTION_CONTIG: usize = 11;
pub const OPTION_COMPRESS: usize = 12;
pub const OPTION_CCORDER: usize = 13;
pub const OPTION_PFACTOR: usize = 14;
pub const OPTION_NSEPS: usize = 15;
pub const OPTION_UFACTOR: usize = 16;
pub const OPTION_NUMBERING: usize = 17;

// mptype_et
pub const PTYPE_RB: Idx = 0;
pub const PTYPE_KWAY: Idx = 1;
// mobjtype_et
pub const OBJTYPE_CUT: Idx = 0;
pub const OBJTYPE_VOL: Idx = 1;
// mctype_et
pub const CTYPE_RM: Idx = 0;
pub const CTYPE_SHEM: Idx = 1;
// miptype_et
pub const IPTYPE_GROW: Idx = 0;
pub const IPTYPE_RANDOM: Idx = 1;
pub const IPTYPE_EDGE: Idx = 2;
pub const IPTYPE_NODE: Idx = 3;
// mrtype_et
pub const RTYPE_FM: Idx = 0;
pub const RTYPE_GREEDY: Idx = 1;
pub const RTYPE_SEP2SIDED: Idx = 2;
pub const RTYPE_SEP1SIDED: Idx = 3;

#[cfg(feature = "metis-support")]
mod abi_checks {
    use super::bindings as b;
    use super::*;
    use static_assertions::const_assert_eq;

    const_assert_eq!(NOPTIONS, b::METIS_NOPTIONS as usize);
    const_assert_eq!(METIS_OK, b::rstatus_et_METIS_OK as c_int);
    const_assert_eq!(METIS_ERROR_INPUT, b::rstatus_et_METIS_ERROR_INPUT as c_int);
    const_assert_eq!(METIS_ERROR_MEMORY, b::rstatus_et_METIS_ERROR_MEMORY as c_int);
    const_assert_eq!(METIS_ERROR, b::rstatus_et_METIS_ERROR as c_int);
    const_assert_eq!(OPTION_PTYPE, b::moptions_et_METIS_OPTION_PTYPE as usize);
    const_assert_eq!(OPTION_DBGLVL, b::moptions_et_METIS_OPTION_DBGLVL as usize);
    const_assert_eq!(OPTION_SEED, b::moptions_et_METIS_OPTION_SEED as usize);
    const_assert_eq!(OPTION_UFACTOR, b::moptions_et_METIS_OPTION_UFACTOR as usize);
    const_assert_eq!(OPTION_NUMBERING, b::moptions_et_METIS_OPTION_NUMBERING as usize);
    const_assert_eq!(PTYPE_KWAY, b::mptype_et_METIS_PTYPE_KWAY as Idx);
    const_assert_eq!(RTYPE_SEP1SIDED, b::mrtype_et_METIS_RTYPE_SEP1SIDED as Idx);
}
