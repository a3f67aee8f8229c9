use crate::application::read_models::{
    CatalogMetadataView, CatalogReadModel, DriverPackView, OsCatalogReadModel, OsImageView,
    SourceView,
};
use crate::ports::outbound::CatalogFormatter;
use crate::shared::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

type XmlWriter = Writer<Vec<u8>>;

/// Root element of the driver pack documents
const DRIVER_PACK_ROOT: &str = "DriverPackCatalog";
/// Root element of the Windows image documents
const OS_IMAGE_ROOT: &str = "OsImageCatalog";

/// XmlFormatter adapter for the XML catalog documents
///
/// Scalars are written as attributes. `Models` and `Hashes` child elements
/// appear only when they carry data; `OsInfo` is always written.
pub struct XmlFormatter;

impl XmlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for XmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogFormatter for XmlFormatter {
    fn extension(&self) -> &'static str {
        "xml"
    }

    fn format_catalog(&self, model: &CatalogReadModel) -> Result<String> {
        let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
        write_root_start(&mut xml, DRIVER_PACK_ROOT, &model.metadata)?;
        write_sources(&mut xml, &model.sources)?;

        xml.write_event(Event::Start(BytesStart::new("DriverPacks")))?;
        for pack in &model.items {
            write_driver_pack(&mut xml, pack)?;
        }
        xml.write_event(Event::End(BytesEnd::new("DriverPacks")))?;

        xml.write_event(Event::End(BytesEnd::new(DRIVER_PACK_ROOT)))?;
        finish(xml)
    }

    fn format_os_catalog(&self, model: &OsCatalogReadModel) -> Result<String> {
        let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
        write_root_start(&mut xml, OS_IMAGE_ROOT, &model.metadata)?;
        write_sources(&mut xml, &model.sources)?;

        xml.write_event(Event::Start(BytesStart::new("OsImages")))?;
        for image in &model.images {
            write_os_image(&mut xml, image)?;
        }
        xml.write_event(Event::End(BytesEnd::new("OsImages")))?;

        xml.write_event(Event::End(BytesEnd::new(OS_IMAGE_ROOT)))?;
        finish(xml)
    }
}

fn write_root_start(xml: &mut XmlWriter, name: &str, metadata: &CatalogMetadataView) -> Result<()> {
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let total_items = metadata.total_items.to_string();
    let mut root = BytesStart::new(name);
    root.push_attribute(("schemaVersion", metadata.schema_version.as_str()));
    root.push_attribute(("generatedAtUtc", metadata.generated_at_utc.as_str()));
    root.push_attribute(("totalItems", total_items.as_str()));
    root.push_attribute(("category", metadata.category.as_str()));
    xml.write_event(Event::Start(root))?;
    Ok(())
}

fn write_sources(xml: &mut XmlWriter, sources: &[SourceView]) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("Sources")))?;
    for source in sources {
        let item_count = source.item_count.to_string();
        let mut element = BytesStart::new("Source");
        element.push_attribute(("manufacturer", source.manufacturer.as_str()));
        element.push_attribute(("catalogUrl", source.catalog_url.as_str()));
        element.push_attribute(("lastUpdated", source.last_updated.as_str()));
        element.push_attribute(("itemCount", item_count.as_str()));
        xml.write_event(Event::Empty(element))?;
    }
    xml.write_event(Event::End(BytesEnd::new("Sources")))?;
    Ok(())
}

fn write_driver_pack(xml: &mut XmlWriter, pack: &DriverPackView) -> Result<()> {
    let size = pack.size_bytes.map(|s| s.to_string());
    let mut element = BytesStart::new("DriverPack");
    element.push_attribute(("id", pack.id.as_str()));
    element.push_attribute(("packageId", pack.package_id.as_str()));
    element.push_attribute(("manufacturer", pack.manufacturer.as_str()));
    push_optional(&mut element, "name", pack.name.as_deref());
    push_optional(&mut element, "version", pack.version.as_deref());
    push_optional(&mut element, "fileName", pack.file_name.as_deref());
    element.push_attribute(("downloadUrl", pack.download_url.as_str()));
    push_optional(&mut element, "sizeBytes", size.as_deref());
    element.push_attribute(("format", pack.format.as_str()));
    element.push_attribute(("type", pack.pack_type.as_str()));
    push_optional(&mut element, "releaseDate", pack.release_date.as_deref());
    xml.write_event(Event::Start(element))?;

    if !pack.models.is_empty() {
        xml.write_event(Event::Start(BytesStart::new("Models")))?;
        for model in &pack.models {
            let mut model_element = BytesStart::new("Model");
            model_element.push_attribute(("name", model.name.as_str()));
            push_optional(&mut model_element, "systemId", model.system_id.as_deref());
            xml.write_event(Event::Empty(model_element))?;
        }
        xml.write_event(Event::End(BytesEnd::new("Models")))?;
    }

    if let Some(hashes) = &pack.hashes {
        let mut hashes_element = BytesStart::new("Hashes");
        push_optional(&mut hashes_element, "md5", hashes.md5.as_deref());
        push_optional(&mut hashes_element, "sha256", hashes.sha256.as_deref());
        push_optional(&mut hashes_element, "crc", hashes.crc.as_deref());
        xml.write_event(Event::Empty(hashes_element))?;
    }

    let mut os = BytesStart::new("OsInfo");
    os.push_attribute(("name", pack.os.name.as_str()));
    push_optional(&mut os, "releaseId", pack.os.release_id.as_deref());
    push_optional(&mut os, "build", pack.os.build.as_deref());
    os.push_attribute(("architecture", pack.os.architecture.as_str()));
    xml.write_event(Event::Empty(os))?;

    xml.write_event(Event::End(BytesEnd::new("DriverPack")))?;
    Ok(())
}

fn write_os_image(xml: &mut XmlWriter, image: &OsImageView) -> Result<()> {
    let size = image.size_bytes.map(|s| s.to_string());
    let mut element = BytesStart::new("OsImage");
    element.push_attribute(("id", image.id.as_str()));
    element.push_attribute(("osName", image.os_name.as_str()));
    push_optional(&mut element, "releaseId", image.release_id.as_deref());
    push_optional(&mut element, "build", image.build.as_deref());
    element.push_attribute(("architecture", image.architecture.as_str()));
    push_optional(&mut element, "languageCode", image.language_code.as_deref());
    push_optional(&mut element, "language", image.language.as_deref());
    push_optional(&mut element, "edition", image.edition.as_deref());
    push_optional(&mut element, "fileName", image.file_name.as_deref());
    element.push_attribute(("downloadUrl", image.download_url.as_str()));
    push_optional(&mut element, "sizeBytes", size.as_deref());
    push_optional(&mut element, "sha1", image.sha1.as_deref());
    push_optional(&mut element, "sha256", image.sha256.as_deref());
    xml.write_event(Event::Empty(element))?;
    Ok(())
}

fn push_optional(element: &mut BytesStart<'_>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        element.push_attribute((name, value));
    }
}

fn finish(xml: XmlWriter) -> Result<String> {
    let mut output = String::from_utf8(xml.into_inner())?;
    output.push('\n');
    Ok(output)
}
