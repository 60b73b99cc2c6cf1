// Reflection flag constants as written by the asset dumper.
//
// Values follow EPropertyFlags and EFunctionFlags from
//   Engine/Source/Runtime/CoreUObject/Public/UObject/ObjectMacros.h
//   Engine/Source/Runtime/CoreUObject/Public/UObject/Script.h
// Only the bits the generator and its tests read are listed.

// ---------------------------------------------------------------------------
// EPropertyFlags (CPF_*), uint64
// ---------------------------------------------------------------------------

pub const CPF_NONE: u64 = 0;
/// Editable in the details panel.
pub const CPF_EDIT: u64 = 0x0000_0000_0000_0001;
/// Const function parameter.
pub const CPF_CONST_PARM: u64 = 0x0000_0000_0000_0002;
/// Readable from blueprint graphs.
pub const CPF_BLUEPRINT_VISIBLE: u64 = 0x0000_0000_0000_0004;
/// Replicated.
pub const CPF_NET: u64 = 0x0000_0000_0000_0020;
/// Function parameter.
pub const CPF_PARM: u64 = 0x0000_0000_0000_0080;
/// Copied out after the call returns.
pub const CPF_OUT_PARM: u64 = 0x0000_0000_0000_0100;
/// Function return value.
pub const CPF_RETURN_PARM: u64 = 0x0000_0000_0000_0400;
/// Hidden on placed instances.
pub const CPF_DISABLE_EDIT_ON_INSTANCE: u64 = 0x0000_0000_0001_0000;
/// Serialized into save games.
pub const CPF_SAVE_GAME: u64 = 0x0000_0000_0100_0000;
/// Passed by reference. Set together with CPF_OUT_PARM and CPF_PARM.
pub const CPF_REFERENCE_PARM: u64 = 0x0000_0000_0800_0000;
/// Has a rep-notify function.
pub const CPF_REP_NOTIFY: u64 = 0x0000_0001_0000_0000;

/// Any of these marks a property as part of a function's calling contract.
pub const CPF_SIGNATURE_FLAGS: u64 = CPF_PARM | CPF_OUT_PARM | CPF_RETURN_PARM;

/// Flags making a parameter pin a by-reference pin.
pub const CPF_BY_REF_FLAGS: u64 = CPF_OUT_PARM | CPF_REFERENCE_PARM;

// ---------------------------------------------------------------------------
// EFunctionFlags (FUNC_*), uint32
// ---------------------------------------------------------------------------

pub const FUNC_EVENT: u32 = 0x0000_0800;
/// The merged event graph of a blueprint class.
pub const FUNC_UBERGRAPH_FUNCTION: u32 = 0x0000_8000;
/// Multicast delegate signature. Always paired with FUNC_DELEGATE.
pub const FUNC_MULTICAST_DELEGATE: u32 = 0x0001_0000;
/// Delegate signature, single or multicast.
pub const FUNC_DELEGATE: u32 = 0x0010_0000;
pub const FUNC_BLUEPRINT_EVENT: u32 = 0x0800_0000;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// True when every bit of `mask` is set in `flags`.
#[inline]
pub const fn has_all_flags(flags: u64, mask: u64) -> bool {
    flags & mask == mask
}

/// True when at least one bit of `mask` is set in `flags`.
#[inline]
pub const fn has_any_flags(flags: u64, mask: u64) -> bool {
    flags & mask != 0
}
