//! End-to-end walker behaviour over small inline documents.

use icon_ir::{
    Color, Fill, GroupNesting, IconType, ParseError, ParseOptions, ParseWarning, PathNode,
    VectorNode, parse_icon, parse_svg, parse_vector_drawable,
};

const NESTED_GROUPS: &str = r#"
<vector xmlns:android="http://schemas.android.com/apk/res/android"
    android:width="24dp" android:height="24dp"
    android:viewportWidth="24" android:viewportHeight="24">
    <group android:name="outer">
        <path android:name="a" android:pathData="M0 0"/>
        <group android:name="inner">
            <path android:name="b" android:pathData="M1 1"/>
        </group>
        <path android:name="c" android:pathData="M2 2"/>
    </group>
    <path android:name="d" android:pathData="M3 3"/>
</vector>
"#;

fn path_names(node: &VectorNode) -> Vec<&str> {
    match node {
        VectorNode::Path(path) => vec![path.name.as_str()],
        VectorNode::Group(group) => group.paths.iter().map(|p| p.name.as_str()).collect(),
    }
}

#[test]
fn minimal_svg() {
    let image = parse_svg(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">
            <path fill="#FF0000" d="M0 0L10 0L10 10Z"/>
        </svg>"##,
    )
    .unwrap();

    assert_eq!(image.nodes.len(), 1);
    let path = image.nodes[0].as_path().unwrap();
    assert_eq!(path.fill, Some(Fill::Solid(Color::from_hex("#FFFF0000"))));
    assert_eq!(path.stroke, None);
    assert_eq!(path.nodes.len(), 4);
    assert_eq!(path.nodes[3], PathNode::Close { relative: false });
    assert_eq!((image.viewport_width, image.viewport_height), (24.0, 24.0));
}

#[test]
fn group_paths_attach_to_the_group() {
    let image = parse_vector_drawable(
        r##"<vector xmlns:android="http://schemas.android.com/apk/res/android">
            <group android:name="g" android:scaleX="2" android:translateY="3">
                <path android:fillColor="#FF000000" android:pathData="M0 0L1 1"/>
            </group>
        </vector>"##,
    )
    .unwrap();

    assert_eq!(image.nodes.len(), 1);
    let group = image.nodes[0].as_group().unwrap();
    assert_eq!(group.paths.len(), 1);
    assert_eq!(group.transform.scale.x, 2.0);
    assert_eq!(group.transform.scale.y, 1.0);
    assert_eq!(group.transform.translation.y, 3.0);
}

#[test]
fn unknown_clip_reference_is_an_empty_clip() {
    let output = parse_icon(
        r#"<svg><g clip-path="url(#missing)"><path d="M0 0"/></g></svg>"#,
        "Clipped",
        &ParseOptions::default(),
    )
    .unwrap();

    let group = output.image_vector.nodes[0].as_group().unwrap();
    assert!(group.clip_path_data.is_empty());
    assert_eq!(
        output.warnings,
        vec![ParseWarning::UnresolvedClipPathReference {
            id: "missing".to_string()
        }]
    );
}

#[test]
fn clip_definitions_must_come_first() {
    let output = parse_icon(
        r#"<svg>
            <g clip-path="url(#late)"/>
            <clipPath id="late"><path d="M0 0H1"/></clipPath>
        </svg>"#,
        "Late",
        &ParseOptions::default(),
    )
    .unwrap();
    assert_eq!(output.warnings.len(), 1);
}

#[test]
fn flat_nesting_keeps_the_last_opened_group() {
    let output = parse_icon(NESTED_GROUPS, "Nested", &ParseOptions::default()).unwrap();
    let nodes = &output.image_vector.nodes;

    assert_eq!(output.icon_type, IconType::Xml);
    assert_eq!(nodes.len(), 2);
    assert_eq!(path_names(&nodes[0]), ["a"]);
    assert_eq!(path_names(&nodes[1]), ["b", "c", "d"]);
}

#[test]
fn stack_nesting_restores_enclosing_groups() {
    let options = ParseOptions::new().with_group_nesting(GroupNesting::Stack);
    let output = parse_icon(NESTED_GROUPS, "Nested", &options).unwrap();
    let nodes = &output.image_vector.nodes;

    assert_eq!(nodes.len(), 3);
    assert_eq!(path_names(&nodes[0]), ["a", "c"]);
    assert_eq!(path_names(&nodes[1]), ["b"]);
    assert!(nodes[2].as_path().is_some());
    assert_eq!(path_names(&nodes[2]), ["d"]);
}

#[test]
fn gradient_items_become_color_stops() {
    let image = parse_vector_drawable(
        r##"<vector xmlns:android="http://schemas.android.com/apk/res/android">
            <group>
                <path android:pathData="M0 0"/>
                <gradient android:type="radial" android:centerX="4" android:centerY="5"
                    android:gradientRadius="6">
                    <item android:offset="0" android:color="#FF0000"/>
                    <item android:color="#0000FF"/>
                    <item android:offset="1"/>
                </gradient>
            </group>
        </vector>"##,
    )
    .unwrap();

    let group = image.nodes[0].as_group().unwrap();
    let Some(Fill::RadialGradient(gradient)) = &group.paths[0].fill else {
        panic!("expected a radial gradient, got {:?}", group.paths[0].fill);
    };
    assert_eq!(gradient.radius, 6.0);
    assert_eq!(gradient.center.x, 4.0);
    let stops: Vec<_> = gradient
        .color_stops
        .iter()
        .map(|stop| (stop.offset, stop.color.to_hex_color()))
        .collect();
    assert_eq!(
        stops,
        [(0.0, "#FFFF0000".to_string()), (0.0, "#FF0000FF".to_string())]
    );
}

#[test]
fn sweep_gradients_are_not_supported() {
    let image = parse_vector_drawable(
        r##"<vector>
            <path android:pathData="M0 0"/>
            <gradient android:type="sweep"><item android:color="#FFF"/></gradient>
        </vector>"##,
    )
    .unwrap();
    assert_eq!(image.nodes[0].as_path().unwrap().fill, None);
}

#[test]
fn missing_root_is_malformed() {
    for text in ["", "<?xml version=\"1.0\"?>", "<html><body/></html>"] {
        let err = parse_icon(text, "Broken", &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::MalformedDocument { .. }), "{text:?}: {err}");
    }
}

#[test]
fn unterminated_markup_is_malformed() {
    let err = parse_svg(r#"<svg><path d="M0 0"/>"#).unwrap_err();
    assert!(matches!(err, ParseError::MalformedDocument { .. }));
}

#[test]
fn bad_path_data_fails_the_whole_document() {
    let err = parse_svg(r#"<svg><path d="M0 0"/><path d="M0 0 K 5"/></svg>"#).unwrap_err();
    let ParseError::MalformedPathData { span, .. } = &err else {
        panic!("expected malformed path data, got {err:?}");
    };
    assert!("M0 0 K 5"[span.offset()..].starts_with('K'));
}

#[test]
fn path_data_errors_render_with_miette() {
    let err = parse_svg(r#"<svg><path d="M0 0L1"/></svg>"#).unwrap_err();
    let report = miette::Report::new(err);
    let rendered = format!("{report:?}");
    assert!(rendered.contains("malformed path data"), "{rendered}");
    assert!(rendered.contains("M0 0L1"), "{rendered}");
}

#[test]
fn transform_lists_fold_in_list_order() {
    let image = parse_svg(
        r#"<svg><g transform="translate(4 6) scale(2)"><path d="M0 0"/></g></svg>"#,
    )
    .unwrap();
    // each operation is pre-multiplied, so the scale also applies to the translation
    let transform = image.nodes[0].as_group().unwrap().transform;
    assert_eq!(transform.translation.x, 8.0);
    assert_eq!(transform.translation.y, 12.0);
    assert_eq!(transform.scale.x, 2.0);
    assert_eq!(transform.rotation, 0.0);
}

#[test]
fn paths_iterates_groups_in_order() {
    let output = parse_icon(NESTED_GROUPS, "Nested", &ParseOptions::default()).unwrap();
    let names: Vec<_> = output
        .image_vector
        .paths()
        .map(|path| path.name.as_str())
        .collect();
    assert_eq!(names, ["a", "b", "c", "d"]);
}
