use super::parse_document;
use crate::catalog_generation::vendors::{LenovoCatalog, LenovoDriverPack};
use crate::shared::Result;
use serde::Deserialize;

const ROOT: &str = "ModelList";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModelList {
    #[serde(rename = "Model")]
    models: Vec<Model>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Model {
    #[serde(rename = "@name")]
    name: Option<String>,
    #[serde(rename = "Types")]
    types: Option<Types>,
    #[serde(rename = "SCCM")]
    sccm: Vec<PackElement>,
    #[serde(rename = "WinPE")]
    winpe: Vec<PackElement>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Types {
    #[serde(rename = "Type")]
    items: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PackElement {
    #[serde(rename = "@os")]
    os: Option<String>,
    #[serde(rename = "@version")]
    version: Option<String>,
    #[serde(rename = "@date")]
    date: Option<String>,
    #[serde(rename = "@crc")]
    crc: Option<String>,
    #[serde(rename = "$text")]
    url: Option<String>,
}

/// Parses Lenovo's `catalogv2.xml`, one row per `SCCM`/`WinPE` element
pub fn parse_lenovo_catalog(payload: &[u8]) -> Result<LenovoCatalog> {
    let document: ModelList = parse_document("Lenovo", payload, ROOT)?;

    let mut packs = Vec::new();
    for model in document.models {
        let machine_types: Vec<String> = model
            .types
            .map(|types| {
                types
                    .items
                    .into_iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let rows = model
            .sccm
            .into_iter()
            .map(|element| ("SCCM", element))
            .chain(model.winpe.into_iter().map(|element| ("WinPE", element)));
        for (kind, element) in rows {
            packs.push(LenovoDriverPack {
                model_name: model.name.clone(),
                machine_types: machine_types.clone(),
                os: element.os,
                os_version: element.version,
                url: element.url,
                crc: element.crc,
                date: element.date,
                kind: Some(kind.to_string()),
            });
        }
    }

    Ok(LenovoCatalog { packs })
}
