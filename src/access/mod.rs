//! Access classification of the reclassified METIS entry points.
//!
//! [`table`] records, for each of the five entry points, whether libmetis
//! writes through each pointer parameter. [`header`] turns that table into the
//! C wrapper header that bindgen reads; the build script renders it and the
//! exact text is available as [`WRAPPER_HEADER`].

pub mod header;
pub mod table;

pub use header::{render_declaration, render_param, render_wrapper};
pub use table::{
    alias_of, Access, EntryPoint, Param, Role, Scalar, ALIAS_PREFIX, ENTRY_POINTS, MESH_TO_DUAL,
    PART_GRAPH_KWAY, PART_GRAPH_RECURSIVE, PART_MESH_DUAL, PART_MESH_NODAL,
};

/// The wrapper header rendered by `build.rs`.
pub const WRAPPER_HEADER: &str = include_str!(concat!(env!("OUT_DIR"), "/metis_shim.h"));

/// Looks up an entry point by its exported symbol name.
pub fn lookup(name: &str) -> Option<&'static EntryPoint> {
    ENTRY_POINTS.iter().find(|e| e.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_entry_points_with_unique_names() {
        let mut names: Vec<_> = ENTRY_POINTS.iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
        assert!(names.iter().all(|n| n.starts_with("METIS_")));
    }

    #[test]
    fn outputs_are_exactly_the_read_write_params() {
        for entry in &ENTRY_POINTS {
            for p in entry.params {
                assert_eq!(
                    p.role == Role::Output,
                    p.access == Access::ReadWrite,
                    "{}::{}",
                    entry.name,
                    p.name
                );
            }
        }
    }

    #[test]
    fn outputs_trail_the_inputs() {
        for entry in &ENTRY_POINTS {
            let first_out = entry
                .params
                .iter()
                .position(|p| !p.is_read_only())
                .expect("every entry point has outputs");
            assert!(entry.params[first_out..].iter().all(|p| !p.is_read_only()));
        }
    }

    #[test]
    fn lookup_by_symbol() {
        let kway = lookup("METIS_PartGraphKway").unwrap();
        assert_eq!(kway.params.len(), 13);
        assert_eq!(
            kway.outputs().map(|p| p.name).collect::<Vec<_>>(),
            ["edgecut", "part"]
        );
        assert!(lookup("METIS_NodeND").is_none());
    }

    #[test]
    fn mesh_to_dual_outputs_are_double_pointers() {
        let outs: Vec<_> = MESH_TO_DUAL.outputs().collect();
        assert_eq!(outs.len(), 2);
        assert!(outs.iter().all(|p| p.depth == 2));
    }

    #[test]
    fn render_param_spelling() {
        let xadj = PART_GRAPH_KWAY.param("xadj").unwrap();
        let part = PART_GRAPH_KWAY.param("part").unwrap();
        let tpwgts = PART_GRAPH_KWAY.param("tpwgts").unwrap();
        let r_xadj = MESH_TO_DUAL.param("r_xadj").unwrap();
        assert_eq!(render_param(xadj), "const idx_t *xadj");
        assert_eq!(render_param(part), "idx_t *part");
        assert_eq!(render_param(tpwgts), "const real_t *tpwgts");
        assert_eq!(render_param(r_xadj), "idx_t **r_xadj");
    }

    #[test]
    fn build_script_header_matches_renderer() {
        assert_eq!(WRAPPER_HEADER, render_wrapper(&ENTRY_POINTS));
    }

    #[test]
    fn header_retires_every_alias_before_redeclaring() {
        let include = WRAPPER_HEADER.find(header::UPSTREAM_INCLUDE).unwrap();
        for entry in &ENTRY_POINTS {
            let define = format!("#define {} {}", entry.name, alias_of(entry.name));
            let undef = format!("#undef {}", entry.name);
            let decl = format!("\n{}(", entry.name);
            let d = WRAPPER_HEADER.find(&define).unwrap();
            let u = WRAPPER_HEADER.find(&undef).unwrap();
            let r = WRAPPER_HEADER.find(&decl).unwrap();
            assert!(d < include && include < u && u < r, "{}", entry.name);
        }
    }
}
