//! XML export for wger exercises.
//!
//! Serializes exercise records (with their muscles, equipment and images) into
//! a single pretty-printed XML document. Descriptions and image payloads are
//! embedded as Base64.
//!
//! # Example
//!
//! ```no_run
//! use wger_xml::{FsImageStorage, XmlExporter};
//! # let records: Vec<wger_common::ExerciseRecord> = Vec::new();
//!
//! let exporter = XmlExporter::new(FsImageStorage::new("media"));
//! let xml = exporter.export(&records)?;
//! std::fs::write("wger_exercises.xml", xml)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Document layout
//!
//! ```text
//! <exercises>
//!     <exercice name=".." author=".." status=".." creation_date=".." category=".."
//!               license=".." language=".." uuid="..">BASE64(description)
//!         <muscles main_muscles_count="N" secondary_muscles_count="M">
//!             <muscle type="main">..</muscle>
//!             <muscle type="secondary">..</muscle>
//!         </muscles>
//!         <equipments>
//!             <equipment>..</equipment>
//!         </equipments>
//!         <images>
//!             <image name="file.png" is_main="True">BASE64(bytes)</image>
//!         </images>
//!     </exercice>
//! </exercises>
//! ```
//!
//! The `images` element is only written for records that have images.

mod error;
mod exporter;
mod storage;

pub use error::{ExportError, Result};
pub use exporter::XmlExporter;
pub use storage::{base_name, FsImageStorage, ImageStorage, MemoryImageStorage};
