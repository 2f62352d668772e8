use super::*;
use crate::access::{
    render_wrapper, Param, Role, Scalar, ENTRY_POINTS, MESH_TO_DUAL, PART_GRAPH_KWAY,
    WRAPPER_HEADER,
};

fn leak(params: Vec<Param>) -> &'static [Param] {
    Box::leak(params.into_boxed_slice())
}

/// `entry` with `param` reclassified as `access`.
fn reclassify(entry: EntryPoint, param: &str, access: Access) -> EntryPoint {
    let params = entry
        .params
        .iter()
        .map(|p| {
            if p.name == param {
                Param { access, ..*p }
            } else {
                *p
            }
        })
        .collect();
    EntryPoint {
        name: entry.name,
        params: leak(params),
    }
}

/// Bindgen-shaped Rust declarations for `entries`.
fn fake_bindings(entries: &[EntryPoint]) -> String {
    let mut out = String::new();
    for e in entries {
        out.push_str("unsafe extern \"C\" {\n");
        out.push_str(&format!("    pub fn {}(\n", e.name));
        for p in e.params {
            let outer = if p.is_read_only() { "*const" } else { "*mut" };
            let inner = " *mut".repeat(p.depth as usize - 1);
            out.push_str(&format!(
                "        {}: {outer}{inner} {},\n",
                p.name,
                p.scalar.c_name()
            ));
        }
        out.push_str("    ) -> ::std::os::raw::c_int;\n}\n");
    }
    out
}

#[test]
fn builtin_table_is_clean() {
    let report = audit_table(&ENTRY_POINTS, WRAPPER_HEADER).unwrap();
    assert!(report.is_clean(), "{report}");
    assert!(run().unwrap().is_clean());
}

#[test]
fn builtin_table_matches_upstream_arity() {
    let upstream = parse_prototypes(UPSTREAM_PROTOTYPES).unwrap();
    for entry in &ENTRY_POINTS {
        let proto = upstream.iter().find(|p| p.name == entry.name).unwrap();
        assert_eq!(proto.params.len(), entry.params.len(), "{}", entry.name);
    }
}

#[test]
fn output_marked_read_only_is_flagged() {
    let bad = reclassify(PART_GRAPH_KWAY, "part", Access::ReadOnly);
    let findings = check_documented(&[bad], DOCUMENTED_OUTPUTS);
    assert_eq!(
        findings,
        vec![Finding::Misclassified {
            function: "METIS_PartGraphKway".into(),
            param: "part".into(),
            declared: "read-only",
            documented: "read-write",
        }]
    );
}

#[test]
fn input_marked_read_write_is_flagged() {
    let bad = reclassify(MESH_TO_DUAL, "eind", Access::ReadWrite);
    let report = audit_table(&[bad], &render_wrapper(&[bad])).unwrap();
    assert_eq!(report.findings.len(), 1, "{report}");
    assert!(matches!(
        &report.findings[0],
        Finding::Misclassified { param, .. } if param == "eind"
    ));
}

#[test]
fn reordered_params_break_signature_compatibility() {
    let mut params = PART_GRAPH_KWAY.params.to_vec();
    params.swap(2, 3);
    let bad = EntryPoint {
        name: PART_GRAPH_KWAY.name,
        params: leak(params),
    };
    let upstream = parse_prototypes(UPSTREAM_PROTOTYPES).unwrap();
    let findings = check_signatures(&[bad], &upstream);
    let positions: Vec<usize> = findings
        .iter()
        .filter_map(|f| match f {
            Finding::ParamMismatch { position, .. } => Some(*position),
            _ => None,
        })
        .collect();
    assert_eq!(positions, vec![2, 3]);
}

#[test]
fn dropped_param_is_an_arity_mismatch() {
    let params = PART_GRAPH_KWAY.params[..12].to_vec();
    let bad = EntryPoint {
        name: PART_GRAPH_KWAY.name,
        params: leak(params),
    };
    let upstream = parse_prototypes(UPSTREAM_PROTOTYPES).unwrap();
    let findings = check_signatures(&[bad], &upstream);
    assert!(findings.contains(&Finding::ArityMismatch {
        function: "METIS_PartGraphKway".into(),
        expected: 13,
        found: 12,
    }));
    assert!(findings.iter().any(|f| matches!(
        f,
        Finding::ParamMismatch { position: 12, found, .. } if found == "(none)"
    )));
}

#[test]
fn wrong_scalar_type_is_flagged() {
    let params = PART_GRAPH_KWAY
        .params
        .iter()
        .map(|p| {
            if p.name == "ubvec" {
                Param {
                    scalar: Scalar::Idx,
                    ..*p
                }
            } else {
                *p
            }
        })
        .collect();
    let bad = EntryPoint {
        name: PART_GRAPH_KWAY.name,
        params: leak(params),
    };
    let upstream = parse_prototypes(UPSTREAM_PROTOTYPES).unwrap();
    let findings = check_signatures(&[bad], &upstream);
    assert_eq!(findings.len(), 1);
    assert!(matches!(
        &findings[0],
        Finding::ParamMismatch { position: 9, expected, .. } if expected == "real_t *ubvec"
    ));
}

#[test]
fn unretired_alias_is_flagged() {
    let header = WRAPPER_HEADER.replace("#undef METIS_PartMeshNodal\n", "");
    let findings = check_header(&ENTRY_POINTS, &header).unwrap();
    assert_eq!(
        findings,
        vec![Finding::AliasProtocol {
            function: "METIS_PartMeshNodal".into(),
            detail: "alias is never retired".into(),
        }]
    );
}

#[test]
fn alias_defined_after_include_is_flagged() {
    let define = "#define METIS_MeshToDual rs_METIS_MeshToDual\n";
    let header = WRAPPER_HEADER.replace(define, "").replace(
        "#include <metis.h>\n",
        &format!("#include <metis.h>\n{define}"),
    );
    let findings = check_header(&ENTRY_POINTS, &header).unwrap();
    assert!(findings.iter().any(|f| matches!(
        f,
        Finding::AliasProtocol { detail, .. } if detail == "alias defined after metis.h"
    )));
}

#[test]
fn leaked_alias_declaration_is_flagged() {
    let header = WRAPPER_HEADER.replace("\nMETIS_PartMeshDual(", "\nrs_METIS_PartMeshDual(");
    let findings = check_header(&ENTRY_POINTS, &header).unwrap();
    assert!(findings.contains(&Finding::AliasLeaked {
        symbol: "rs_METIS_PartMeshDual".into(),
        source: "wrapper header",
    }));
    assert!(findings.contains(&Finding::MissingDeclaration {
        function: "METIS_PartMeshDual".into(),
        source: "wrapper header",
    }));
}

#[test]
fn header_without_const_is_flagged_per_input() {
    let header = WRAPPER_HEADER.replace("const ", "");
    let findings = check_header(&ENTRY_POINTS, &header).unwrap();
    let inputs: usize = ENTRY_POINTS.iter().map(|e| e.inputs().count()).sum();
    assert_eq!(findings.len(), inputs);
    assert!(findings
        .iter()
        .all(|f| matches!(f, Finding::QualifierMismatch { generated: "read-write", .. })));
}

#[test]
fn matching_bindings_are_clean() {
    let text = fake_bindings(&ENTRY_POINTS);
    assert!(check_bindings(&ENTRY_POINTS, &text).is_empty());
}

#[test]
fn mutable_input_in_bindings_is_flagged() {
    let loose = reclassify(PART_GRAPH_KWAY, "options", Access::ReadWrite);
    let text = fake_bindings(&[loose]);
    let findings = check_bindings(&[PART_GRAPH_KWAY], &text);
    assert_eq!(
        findings,
        vec![Finding::QualifierMismatch {
            function: "METIS_PartGraphKway".into(),
            param: "options".into(),
            declared: "read-only",
            generated: "read-write",
            source: "generated bindings",
        }]
    );
}

#[test]
fn aliased_binding_is_flagged() {
    let text = fake_bindings(&[MESH_TO_DUAL]).replace("METIS_MeshToDual", "rs_METIS_MeshToDual");
    let findings = check_bindings(&[MESH_TO_DUAL], &text);
    assert_eq!(findings.len(), 2);
    assert!(findings.contains(&Finding::AliasLeaked {
        symbol: "rs_METIS_MeshToDual".into(),
        source: "generated bindings",
    }));
}

#[test]
fn every_output_role_is_read_write() {
    for entry in &ENTRY_POINTS {
        for p in entry.outputs() {
            assert_eq!(p.role, Role::Output);
        }
    }
}

#[test]
fn report_serialises_with_kind_tag() {
    let report = AuditReport {
        findings: vec![Finding::AliasLeaked {
            symbol: "rs_METIS_PartGraphKway".into(),
            source: "generated bindings",
        }],
    };
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["findings"][0]["kind"], "alias_leaked");
    assert_eq!(json["findings"][0]["symbol"], "rs_METIS_PartGraphKway");
    assert!(report.to_string().contains("1 finding(s)"));
}
