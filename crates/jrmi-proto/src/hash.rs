use jrmi_serial::StreamWriter;
use sha1::{Digest, Sha1};

use crate::Result;

/// 64-bit RMI method hash for a method signature such as
/// `invoke(Ljavax/management/ObjectName;...)Ljava/lang/Object;`.
///
/// SHA-1 over the `writeUTF` form of the signature; the first eight digest
/// bytes, read little-endian, are the hash.
pub fn method_hash(signature: &str) -> Result<i64> {
    let mut writer = StreamWriter::new();
    writer.write_utf(signature)?;
    let digest = Sha1::digest(writer.into_vec());

    let mut low = [0u8; 8];
    low.copy_from_slice(&digest[..8]);
    Ok(i64::from_le_bytes(low))
}
