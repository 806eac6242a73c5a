use jrmi_serial::constants::{SC_SERIALIZABLE, SC_WRITE_METHOD};
use jrmi_serial::{ClassDesc, Content, NewObject};

use crate::constants::OBJECT_NAME_CLASS;
use crate::error::Result;
use crate::uids::ClassUidTable;

/// A serialized `javax.management.ObjectName`.
///
/// `ObjectName.writeObject` writes no fields and then the canonical name as a
/// string, so the object carries `name` as its only annotation. The end-block
/// that closes it is not included; callers append [`Content::EndBlockData`].
pub fn object_name_argument(name: &str, uids: &ClassUidTable) -> Result<Content> {
    let desc = ClassDesc::new(OBJECT_NAME_CLASS, uids.get(OBJECT_NAME_CLASS)?)
        .with_flags(SC_WRITE_METHOD | SC_SERIALIZABLE);
    let object = NewObject::new(desc, vec![Content::utf(name).into()])?;
    Ok(object.into())
}
