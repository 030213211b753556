//! RDF/XML serialization of a [`TaxonMapping`].
//!
//! Every taxon becomes one `owl:Class` whose IRI is the configured base IRI
//! followed by the taxon key. Parents are expressed with `rdfs:subClassOf`.

use crate::{
    config::OntologySettings,
    ontology::{
        entities::{TaxonMapping, TaxonNode},
        value_objects::TaxonKey,
    },
};

const RDF_HEADER: &str = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">"#;
const RDF_FOOTER: &str = "</rdf:RDF>";

/// Renders `mapping` with the default settings.
#[must_use]
pub fn render(mapping: &TaxonMapping) -> String {
    render_with(mapping, &OntologySettings::default())
}

/// Renders `mapping` as an RDF/XML document.
///
/// Classes appear in the mapping's insertion order. Labels are written
/// verbatim unless `settings.escape_labels` is set.
#[must_use]
pub fn render_with(mapping: &TaxonMapping, settings: &OntologySettings) -> String {
    let mut out = String::from(RDF_HEADER);
    for (key, node) in mapping.iter() {
        out.push('\n');
        write_class(&mut out, key, node, settings);
    }
    out.push('\n');
    out.push_str(RDF_FOOTER);
    out
}

fn write_class(out: &mut String, key: &TaxonKey, node: &TaxonNode, settings: &OntologySettings) {
    let base = settings.base_iri.as_str();
    out.push_str("    <owl:Class rdf:about=\"");
    out.push_str(base);
    out.push_str(key.as_str());
    out.push_str("\">\n        <rdfs:label xml:lang=\"");
    out.push_str(&settings.label_language);
    out.push_str("\">");
    if settings.escape_labels {
        escape_xml_into(out, &node.name);
    } else {
        out.push_str(&node.name);
    }
    out.push_str("</rdfs:label>");
    if let Some(parent) = &node.parent_key {
        out.push_str("\n        <rdfs:subClassOf rdf:resource=\"");
        out.push_str(base);
        out.push_str(parent.as_str());
        out.push_str("\"/>");
    }
    out.push_str("\n    </owl:Class>");
}

fn escape_xml_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{render, render_with};
    use crate::{
        config::OntologySettings,
        ontology::{
            entities::{Rank, TaxonMapping, TaxonNode},
            value_objects::{Iri, TaxonKey},
        },
    };

    fn lineage() -> TaxonMapping {
        let mut mapping = TaxonMapping::new();
        mapping.insert(TaxonKey::from(1), TaxonNode::new("Animalia", Rank::Kingdom));
        mapping.insert(
            TaxonKey::from(44),
            TaxonNode::new("Chordata", Rank::Phylum).with_parent(Some(TaxonKey::from(1))),
        );
        mapping
    }

    #[test]
    fn empty_mapping_renders_header_and_footer() {
        let document = render(&TaxonMapping::new());
        assert_eq!(
            document,
            "<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"\n         xmlns:rdfs=\"http://www.w3.org/2000/01/rdf-schema#\"\n         xmlns:owl=\"http://www.w3.org/2002/07/owl#\">\n</rdf:RDF>"
        );
        assert!(!document.contains("owl:Class"));
    }

    #[test]
    fn renders_one_class_per_taxon() {
        let document = render(&lineage());

        assert_eq!(document.matches("<owl:Class ").count(), 2);
        assert_eq!(document.matches("<rdfs:subClassOf ").count(), 1);
        assert!(document.contains(
            "    <owl:Class rdf:about=\"https://www.gbif.org/species/44\">\n        <rdfs:label xml:lang=\"lat\">Chordata</rdfs:label>\n        <rdfs:subClassOf rdf:resource=\"https://www.gbif.org/species/1\"/>\n    </owl:Class>"
        ));
        assert!(document.contains(
            "    <owl:Class rdf:about=\"https://www.gbif.org/species/1\">\n        <rdfs:label xml:lang=\"lat\">Animalia</rdfs:label>\n    </owl:Class>"
        ));
    }

    #[test]
    fn classes_follow_insertion_order() {
        let document = render(&lineage());
        let kingdom = document.find("species/1\"").expect("kingdom class");
        let phylum = document.find("species/44\"").expect("phylum class");
        assert!(kingdom < phylum);
    }

    #[test]
    fn labels_pass_through_by_default() {
        let mut mapping = TaxonMapping::new();
        mapping.insert(TaxonKey::from(5), TaxonNode::new("A & B", Rank::Kingdom));

        assert!(render(&mapping).contains(">A & B</rdfs:label>"));
    }

    #[test]
    fn labels_are_escaped_on_request() {
        let mut mapping = TaxonMapping::new();
        mapping.insert(TaxonKey::from(5), TaxonNode::new("A & <B>", Rank::Kingdom));
        let settings = OntologySettings {
            escape_labels: true,
            ..OntologySettings::default()
        };

        assert!(render_with(&mapping, &settings).contains(">A &amp; &lt;B&gt;</rdfs:label>"));
    }

    #[test]
    fn honours_base_iri_and_language() {
        let settings = OntologySettings {
            base_iri: Iri::new("https://example.org/taxa/").expect("valid IRI"),
            label_language: "la".to_string(),
            escape_labels: false,
        };
        let document = render_with(&lineage(), &settings);

        assert!(document.contains("rdf:about=\"https://example.org/taxa/44\""));
        assert!(document.contains("rdf:resource=\"https://example.org/taxa/1\""));
        assert!(document.contains("xml:lang=\"la\""));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render(&lineage()), render(&lineage()));
    }
}
