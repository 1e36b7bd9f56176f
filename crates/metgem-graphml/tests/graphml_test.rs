use metgem_graph::{AttrValue, Graph, WEIGHT_KEY};

const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="g_title" for="graph" attr.name="title" attr.type="string"/>
  <key id="v_name" for="node" attr.name="name" attr.type="long"/>
  <key id="v_mz" for="node" attr.name="mz" attr.type="double"/>
  <key id="e___weight" for="edge" attr.name="__weight" attr.type="double"/>
  <graph id="G" edgedefault="undirected">
    <data key="g_title">test network</data>
    <node id="a"><data key="v_name">0</data><data key="v_mz">301.25</data></node>
    <node id="b"><data key="v_name">1</data><data key="v_mz">449.1</data></node>
    <node id="c"><data key="v_name">2</data></node>
    <edge source="a" target="b"><data key="e___weight">0.84</data></edge>
    <edge source="1" target="2"/>
  </graph>
</graphml>
"#;

#[test]
fn parses_typed_attributes() {
    let g = metgem_graphml::parse_str(SAMPLE).unwrap();
    assert_eq!(g.vertex_count(), 3);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.attr("title"), Some(&AttrValue::Str("test network".into())));
    assert_eq!(g.vertex_attr(0, "name"), Some(&AttrValue::Int(0)));
    assert_eq!(g.vertex_attr(1, "mz"), Some(&AttrValue::Float(449.1)));
    assert_eq!(g.edge_weight(0), 0.84);
    // Second edge carries no weight attribute.
    assert_eq!(g.edge_weight(1), metgem_graph::DEFAULT_WEIGHT);
}

#[test]
fn edges_resolve_by_xml_id_or_name_value() {
    let g = metgem_graphml::parse_str(SAMPLE).unwrap();
    let first = g.edge(0).unwrap();
    assert_eq!((first.source, first.target), (0, 1));
    // `source="1" target="2"` match the name attribute values of b and c.
    let second = g.edge(1).unwrap();
    assert_eq!((second.source, second.target), (1, 2));
}

#[test]
fn malformed_numerics_degrade_to_zero() {
    let xml = r#"<graphml>
      <key id="k0" for="node" attr.name="charge" attr.type="int"/>
      <key id="k1" for="node" attr.name="mz" attr.type="double"/>
      <graph edgedefault="undirected">
        <node id="a"><data key="k0">not-a-number</data><data key="k1">oops</data></node>
      </graph>
    </graphml>"#;
    let g = metgem_graphml::parse_str(xml).unwrap();
    assert_eq!(g.vertex_attr(0, "charge"), Some(&AttrValue::Int(0)));
    assert_eq!(g.vertex_attr(0, "mz"), Some(&AttrValue::Float(0.0)));
}

#[test]
fn boolean_values_accept_true_and_one() {
    let xml = r#"<graphml>
      <key id="k0" for="node" attr.name="flag" attr.type="boolean"/>
      <graph edgedefault="undirected">
        <node id="a"><data key="k0">true</data></node>
        <node id="b"><data key="k0">1</data></node>
        <node id="c"><data key="k0">false</data></node>
      </graph>
    </graphml>"#;
    let g = metgem_graphml::parse_str(xml).unwrap();
    assert_eq!(g.vertex_attr(0, "flag"), Some(&AttrValue::Bool(true)));
    assert_eq!(g.vertex_attr(1, "flag"), Some(&AttrValue::Bool(true)));
    assert_eq!(g.vertex_attr(2, "flag"), Some(&AttrValue::Bool(false)));
}

#[test]
fn missing_graph_element_is_an_error() {
    let result = metgem_graphml::parse_str("<graphml></graphml>");
    assert!(matches!(result, Err(metgem_graphml::Error::MissingGraphElement)));
}

#[test]
fn unknown_endpoint_is_an_error() {
    let xml = r#"<graphml>
      <graph edgedefault="undirected">
        <node id="a"/>
        <edge source="a" target="ghost"/>
      </graph>
    </graphml>"#;
    let result = metgem_graphml::parse_str(xml);
    assert!(matches!(
        result,
        Err(metgem_graphml::Error::UnknownEndpoint { id }) if id == "ghost"
    ));
}

fn sample_network() -> Graph {
    let mut g = Graph::new();
    g.set_attr("title", AttrValue::Str("net & <friends>".into()));
    g.add_vertices(3);
    for v in 0..3 {
        g.set_vertex_attr(v, "name", AttrValue::Int(v as i64)).unwrap();
        g.set_vertex_attr(v, "label", AttrValue::Str(format!("m/z \"{v}\"")))
            .unwrap();
    }
    g.add_weighted_edge(0, 1, 0.75).unwrap();
    g.add_weighted_edge(1, 2, 0.5).unwrap();
    g
}

#[test]
fn written_documents_round_trip() {
    let original = sample_network();
    let xml = metgem_graphml::to_string(&original);
    let parsed = metgem_graphml::parse_str(&xml).unwrap();

    assert_eq!(parsed.vertex_count(), original.vertex_count());
    assert_eq!(parsed.edge_count(), original.edge_count());
    assert_eq!(parsed.attr("title"), original.attr("title"));
    for v in 0..3 {
        assert_eq!(parsed.vertex_attr(v, "name"), original.vertex_attr(v, "name"));
        assert_eq!(parsed.vertex_attr(v, "label"), original.vertex_attr(v, "label"));
    }
    assert_eq!(parsed.edge_weight(0), 0.75);
    assert_eq!(parsed.edge_weight(1), 0.5);
    let e = parsed.edge(0).unwrap();
    assert_eq!((e.source, e.target), (0, 1));
}

#[test]
fn writer_declares_typed_keys() {
    let xml = metgem_graphml::to_string(&sample_network());
    assert!(xml.contains(r#"<key id="g_title" for="graph" attr.name="title" attr.type="string"/>"#));
    assert!(xml.contains(r#"<key id="v_name" for="node" attr.name="name" attr.type="long"/>"#));
    assert!(
        xml.contains(r#"<key id="e___weight" for="edge" attr.name="__weight" attr.type="double"/>"#)
    );
    assert!(xml.contains("net &amp; &lt;friends&gt;"));
}

#[test]
fn nodes_without_a_name_get_positional_ids() {
    let mut g = Graph::new();
    g.add_vertices(2);
    g.add_edge(0, 1).unwrap();
    let xml = metgem_graphml::to_string(&g);
    assert!(xml.contains(r#"<node id="n0">"#));
    assert!(xml.contains(r#"<edge source="n0" target="n1">"#));
    let parsed = metgem_graphml::parse_str(&xml).unwrap();
    assert_eq!(parsed.vertex_count(), 2);
    assert_eq!(parsed.edge_count(), 1);
}

#[test]
fn files_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("network.graphml");
    let original = sample_network();
    metgem_graphml::write_file(&original, &path).unwrap();
    let parsed = metgem_graphml::parse_file(&path).unwrap();
    assert_eq!(parsed.vertex_count(), original.vertex_count());
    assert_eq!(parsed.edge_weight(0), 0.75);
}
