use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use rgit_hash::hasher::Hasher;
use rgit_hash::ObjectId;
use rgit_object::header;
use rgit_object::{Object, ObjectType};

use crate::{LooseError, LooseObjectStore};

impl LooseObjectStore {
    /// Write an object to the loose store. Returns the OID.
    ///
    /// No-op if the object already exists (content-addressed idempotency).
    /// The file is written through a temp file and atomic rename.
    pub fn write(&self, obj: &Object) -> Result<ObjectId, LooseError> {
        let payload = obj.serialize_payload();
        self.write_raw(obj.object_type(), &payload)
    }

    /// Hash raw payload bytes with a known kind without touching disk.
    pub fn hash_raw(obj_type: ObjectType, payload: &[u8]) -> Result<ObjectId, LooseError> {
        Ok(Hasher::hash_object(obj_type.as_str(), payload)?)
    }

    /// Write raw payload bytes with a known kind. Returns the OID.
    ///
    /// No-op if the object already exists (idempotent).
    pub fn write_raw(
        &self,
        obj_type: ObjectType,
        payload: &[u8],
    ) -> Result<ObjectId, LooseError> {
        let hdr = header::write_header(obj_type, payload.len());

        // The OID covers the uncompressed header + payload.
        let oid = {
            let mut hasher = Hasher::new();
            hasher.update(&hdr);
            hasher.update(payload);
            hasher.finalize()?
        };

        if self.contains(&oid) {
            return Ok(oid);
        }

        // Ensure the fan-out directory exists.
        let final_path = self.object_path(&oid);
        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to a temp file in the objects dir (same filesystem, so the
        // final rename is atomic).
        let tmp_path = write_to_temp(self.objects_dir(), &hdr, payload, self.compression_level)?;
        finalize_object(&tmp_path, &final_path)?;

        Ok(oid)
    }
}

/// Compress header + payload into a temp file under `objects_dir`.
fn write_to_temp(
    objects_dir: &Path,
    hdr: &[u8],
    payload: &[u8],
    level: flate2::Compression,
) -> Result<std::path::PathBuf, LooseError> {
    let tmp_path = objects_dir.join(format!(
        "tmp_obj_{}",
        std::process::id()
            ^ std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .subsec_nanos()
    ));

    let file = fs::File::create(&tmp_path)?;
    let mut encoder = ZlibEncoder::new(file, level);
    encoder.write_all(hdr)?;
    encoder.write_all(payload)?;
    encoder.finish()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o644))?;
    }

    Ok(tmp_path)
}

/// Atomically move a temp file to its final destination.
///
/// If the destination already exists (race with another writer), the temp
/// file is removed and the write is treated as successful: the bytes are
/// identical by construction.
fn finalize_object(tmp: &Path, final_path: &Path) -> Result<(), LooseError> {
    match fs::rename(tmp, final_path) {
        Ok(()) => Ok(()),
        Err(_) if final_path.exists() => {
            let _ = fs::remove_file(tmp);
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(tmp);
            Err(LooseError::Io(e))
        }
    }
}
