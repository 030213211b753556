use axum::http::StatusCode;
use rstest::rstest;
use serde_json::{json, Value};
use taxon_owl::{
    controller::owl::GenerateOwlResponse,
    tests_cfg::{records, StaticTaxonomy},
};

use crate::server_with;

const BASE: &str = "https://www.gbif.org/species/";

fn class_count(owl: &str, key: u64) -> usize {
    owl.matches(&format!("<owl:Class rdf:about=\"{BASE}{key}\">"))
        .count()
}

#[rstest]
#[case::empty_list(json!({ "species": [] }))]
#[case::missing_field(json!({}))]
#[case::null_field(json!({ "species": null }))]
#[case::blank_names(json!({ "species": ["", "   "] }))]
#[tokio::test]
async fn rejects_requests_without_species(#[case] body: Value) {
    let server = server_with(StaticTaxonomy::with_fixtures());

    let response = server.post("/generate_owl").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "No species provided" })
    );
}

#[tokio::test]
async fn rejects_malformed_payloads() {
    let server = server_with(StaticTaxonomy::with_fixtures());

    let response = server
        .post("/generate_owl")
        .json(&json!({ "species": "Apis mellifera" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn unrecognized_names_yield_an_empty_ontology() {
    let server = server_with(StaticTaxonomy::with_fixtures());

    let response = server
        .post("/generate_owl")
        .json(&json!({ "species": ["Nonexistus fakeus"] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let owl = response.json::<GenerateOwlResponse>().owl;
    assert!(owl.starts_with("<rdf:RDF"));
    assert!(owl.ends_with("</rdf:RDF>"));
    assert!(!owl.contains("owl:Class"));
}

#[tokio::test]
async fn builds_the_full_lineage_of_a_species() {
    let server = server_with(StaticTaxonomy::with_fixtures());

    let response = server
        .post("/generate_owl")
        .json(&json!({ "species": ["Apis mellifera"] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let owl = response.json::<GenerateOwlResponse>().owl;
    for key in [1, 54, 216, 1457, 7_799_978, 1_334_757, 1_341_976] {
        assert_eq!(class_count(&owl, key), 1, "class {key}");
    }
    assert!(owl.contains(
        "<owl:Class rdf:about=\"https://www.gbif.org/species/1341976\">\n        <rdfs:label xml:lang=\"lat\">Apis mellifera</rdfs:label>\n        <rdfs:subClassOf rdf:resource=\"https://www.gbif.org/species/1334757\"/>\n    </owl:Class>"
    ));
    assert!(owl.contains(
        "<owl:Class rdf:about=\"https://www.gbif.org/species/1\">\n        <rdfs:label xml:lang=\"lat\">Animalia</rdfs:label>\n    </owl:Class>"
    ));
}

#[tokio::test]
async fn shared_ancestors_are_emitted_once() {
    let server = server_with(StaticTaxonomy::with_fixtures());

    let response = server
        .post("/generate_owl")
        .json(&json!({ "species": ["Bos taurus", "Ovis aries", "Unknown", "Sus"] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let owl = response.json::<GenerateOwlResponse>().owl;
    for key in [1, 44, 359, 731] {
        assert_eq!(class_count(&owl, key), 1, "class {key}");
    }
    assert_eq!(class_count(&owl, 2_441_022), 1);
    assert_eq!(class_count(&owl, 2_441_114), 1);
    assert_eq!(class_count(&owl, 7_705_930), 1);
    assert_eq!(owl.matches("<owl:Class ").count(), 11);
}

#[tokio::test]
async fn accepted_species_is_backfilled_from_synonyms() {
    let record = taxon_owl::taxonomy::ClassificationRecord {
        species: None,
        ..records::prochilodus_scrofa()
    };
    let client = StaticTaxonomy::default()
        .with_record("Prochilodus scrofa", record)
        .with_synonyms(
            2_353_280,
            vec![taxon_owl::taxonomy::SynonymEntry {
                key: Some(5_212_916),
                scientific_name: Some("Prochilodus scrofa Steindachner, 1881".to_string()),
                accepted_key: Some(2_353_280),
            }],
        );
    let server = server_with(client);

    let response = server
        .post("/generate_owl")
        .json(&json!({ "species": ["Prochilodus scrofa"] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let owl = response.json::<GenerateOwlResponse>().owl;
    assert!(owl.contains(
        "<owl:Class rdf:about=\"https://www.gbif.org/species/2353280\">\n        <rdfs:label xml:lang=\"lat\">Prochilodus scrofa Steindachner, 1881</rdfs:label>\n        <rdfs:subClassOf rdf:resource=\"https://www.gbif.org/species/2353273\"/>\n    </owl:Class>"
    ));
}
