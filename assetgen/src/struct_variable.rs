// User struct member reconstruction.

use assetgen_ue_flags::{has_all_flags, CPF_DISABLE_EDIT_ON_INSTANCE, CPF_SAVE_GAME};
use serde::Serialize;

use crate::error::Result;
use crate::field_class::ContainerKind;
use crate::guid::FGuid;
use crate::naming::{friendly_member_name, guid_from_member_name};
use crate::pin_type::{PinCategory, PinTypeResolver, TerminalType};
use crate::registry::{ObjectRegistry, ObjectRef};
use crate::schema::PropertyDescriptor;

/// Editable description of one user struct member.
///
/// Compared field by field when deciding whether a regenerated struct
/// still matches the one on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructVariableDescription {
    pub var_name: String,
    pub var_guid: FGuid,
    pub friendly_name: String,
    pub category: PinCategory,
    pub sub_category: Option<String>,
    pub sub_category_object: Option<ObjectRef>,
    pub value_type: Option<TerminalType>,
    pub container: ContainerKind,
    pub dont_edit_on_instance: bool,
    pub enable_save_game: bool,
    /// Not carried by compiled properties; always false.
    pub enable_3d_widget: bool,
    /// Not carried by compiled properties; always false.
    pub enable_multiline_text: bool,
    pub tooltip: String,
}

/// Build the member description of a compiled struct property.
pub fn populate_struct_variable<R: ObjectRegistry + ?Sized>(
    desc: &PropertyDescriptor,
    resolver: &mut PinTypeResolver<'_, R>,
) -> Result<StructVariableDescription> {
    let pin = resolver.convert(desc)?;
    let full_name = desc.object_name.as_str();
    let friendly_name = friendly_member_name(full_name)?;

    Ok(StructVariableDescription {
        var_name: full_name.to_string(),
        var_guid: guid_from_member_name(full_name),
        friendly_name: friendly_name.to_string(),
        category: pin.category,
        sub_category: pin.sub_category,
        sub_category_object: pin.sub_category_object,
        value_type: pin.value_type,
        container: pin.container,
        dont_edit_on_instance: has_all_flags(desc.property_flags, CPF_DISABLE_EDIT_ON_INSTANCE),
        enable_save_game: has_all_flags(desc.property_flags, CPF_SAVE_GAME),
        enable_3d_widget: false,
        enable_multiline_text: false,
        tooltip: String::new(),
    })
}
