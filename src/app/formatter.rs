use crate::app::error::FilesystemError;
use crate::app::models::{FileEntry, Manifest};
use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::io::Write;
use std::path::Path;

const TOOLS_VERSION: &str = "4.0";
const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

pub struct OutputGenerator;

impl OutputGenerator {
    /// Renders the whole filters document in memory.
    pub fn generate(manifest: &Manifest) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("Project").with_attributes([
            ("ToolsVersion", TOOLS_VERSION),
            ("xmlns", MSBUILD_NAMESPACE),
        ])))?;

        writer.write_event(Event::Start(BytesStart::new("ItemGroup")))?;
        for filter in &manifest.filters {
            writer.write_event(Event::Start(
                BytesStart::new("Filter").with_attributes([("Include", filter.include.as_str())]),
            ))?;
            write_text_element(&mut writer, "UniqueIdentifier", &filter.unique_identifier)?;
            writer.write_event(Event::End(BytesEnd::new("Filter")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("ItemGroup")))?;

        write_file_group(&mut writer, &manifest.headers)?;
        write_file_group(&mut writer, &manifest.compiled)?;

        writer.write_event(Event::End(BytesEnd::new("Project")))?;

        let mut out = writer.into_inner();
        out.write_all(b"\n")?;
        Ok(out)
    }

    /// Renders and writes the document, replacing whatever was at `path`.
    /// Nothing is written unless rendering succeeded.
    pub fn write_to(manifest: &Manifest, path: &Path) -> Result<()> {
        let document = Self::generate(manifest)?;
        fs::write(path, document).map_err(|source| FilesystemError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

fn write_file_group<W: Write>(writer: &mut Writer<W>, entries: &[FileEntry]) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("ItemGroup")))?;
    for entry in entries {
        let tag = entry.category.element_name();
        let start = BytesStart::new(tag).with_attributes([("Include", entry.include.as_str())]);
        match &entry.filter {
            Some(filter) => {
                writer.write_event(Event::Start(start))?;
                write_text_element(writer, "Filter", filter)?;
                writer.write_event(Event::End(BytesEnd::new(tag)))?;
            }
            None => writer.write_event(Event::Empty(start))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new("ItemGroup")))?;
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{Category, FilterEntry};
    use tempfile::TempDir;

    fn sample() -> Manifest {
        Manifest {
            filters: vec![FilterEntry {
                include: "src".into(),
                unique_identifier: "{00000000-0000-0000-0000-000000000001}".into(),
            }],
            headers: vec![FileEntry {
                include: "src\\a.h".into(),
                category: Category::Header,
                filter: Some("src".into()),
            }],
            compiled: vec![
                FileEntry {
                    include: "main.cpp".into(),
                    category: Category::Source,
                    filter: None,
                },
                FileEntry {
                    include: "fx\\blur.hlsl".into(),
                    category: Category::Shader,
                    filter: Some("Resources\\Shaders".into()),
                },
            ],
        }
    }

    #[test]
    fn renders_project_document() -> Result<()> {
        let xml = String::from_utf8(OutputGenerator::generate(&sample())?)?;

        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="4.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <ItemGroup>
    <Filter Include="src">
      <UniqueIdentifier>{00000000-0000-0000-0000-000000000001}</UniqueIdentifier>
    </Filter>
  </ItemGroup>
  <ItemGroup>
    <ClInclude Include="src\a.h">
      <Filter>src</Filter>
    </ClInclude>
  </ItemGroup>
  <ItemGroup>
    <ClCompile Include="main.cpp"/>
    <CustomBuild Include="fx\blur.hlsl">
      <Filter>Resources\Shaders</Filter>
    </CustomBuild>
  </ItemGroup>
</Project>
"#;
        assert_eq!(xml, expected);
        Ok(())
    }

    #[test]
    fn empty_manifest_keeps_all_groups() -> Result<()> {
        let xml = String::from_utf8(OutputGenerator::generate(&Manifest::default())?)?;
        assert_eq!(xml.matches("<ItemGroup").count(), 3);
        Ok(())
    }

    #[test]
    fn special_characters_are_escaped() -> Result<()> {
        let manifest = Manifest {
            headers: vec![FileEntry {
                include: "R&D\\<odd>.h".into(),
                category: Category::Header,
                filter: Some("R&D".into()),
            }],
            ..Manifest::default()
        };
        let xml = String::from_utf8(OutputGenerator::generate(&manifest)?)?;
        assert!(xml.contains(r#"Include="R&amp;D\&lt;odd&gt;.h""#));
        assert!(xml.contains("<Filter>R&amp;D</Filter>"));
        Ok(())
    }

    #[test]
    fn write_replaces_existing_file() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("Game.vcxproj.filters");
        fs::write(&path, "old content that is much longer than anything else")?;

        OutputGenerator::write_to(&sample(), &path)?;

        let written = fs::read_to_string(&path)?;
        assert!(written.starts_with("<?xml"));
        assert!(!written.contains("old content"));
        Ok(())
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("out.filters");
        let err = OutputGenerator::write_to(&sample(), &path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FilesystemError>(),
            Some(FilesystemError::Write { .. })
        ));
    }
}
