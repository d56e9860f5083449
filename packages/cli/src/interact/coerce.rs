use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_json_abi::Param;
use anyhow::{Context, Result};
use meridian_types::encode_word;

/// Whether the declared type carries the protocol's fixed-word encoding
pub fn is_fixed_word(ty: &str) -> bool {
    ty.contains("bytes32")
}

pub fn is_array(ty: &str) -> bool {
    ty.ends_with(']')
}

/// The prompt label for one parameter
pub fn param_label(param: &Param) -> String {
    match param.name.is_empty() {
        true => param.ty.clone(),
        false => format!("{} ({})", param.name, param.ty),
    }
}

/// One coercion rule per type shape: arrays split the raw text on commas,
/// fixed words go through the canonical string-to-word conversion, and
/// everything else coerces through the ABI type tag. Anything this lets
/// through is caught when the call itself is encoded or attempted
pub fn coerce_arg(param: &Param, raw: &str) -> Result<DynSolValue> {
    match (is_array(&param.ty), is_fixed_word(&param.ty)) {
        (true, true) => raw
            .split(',')
            .map(|element| word_value(element.trim()))
            .collect::<Result<Vec<_>>>()
            .map(|elements| array_value(&param.ty, elements)),
        (true, false) => {
            let element_ty = element_type(&param.ty)?;
            raw.split(',')
                .map(|element| {
                    element_ty.coerce_str(element.trim()).with_context(|| {
                        format!(
                            "could not parse {element:?} as {}",
                            element_ty.sol_type_name()
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(|elements| array_value(&param.ty, elements))
        }
        (false, true) => word_value(raw),
        (false, false) => {
            let ty: DynSolType = param
                .ty
                .parse()
                .with_context(|| format!("unsupported parameter type {}", param.ty))?;
            ty.coerce_str(raw)
                .with_context(|| format!("could not parse {raw:?} as {}", ty.sol_type_name()))
        }
    }
}

fn word_value(raw: &str) -> Result<DynSolValue> {
    Ok(DynSolValue::FixedBytes(encode_word(raw)?, 32))
}

// a dynamic `[]` suffix becomes an Array, a sized `[n]` suffix a FixedArray
fn array_value(ty: &str, elements: Vec<DynSolValue>) -> DynSolValue {
    match ty.ends_with("[]") {
        true => DynSolValue::Array(elements),
        false => DynSolValue::FixedArray(elements),
    }
}

fn element_type(ty: &str) -> Result<DynSolType> {
    let open = ty.rfind('[').context("array type without a bracket")?;
    ty[..open]
        .parse()
        .with_context(|| format!("unsupported element type in {ty}"))
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_primitives::U256;

    fn param(name: &str, ty: &str) -> Param {
        serde_json::from_str(&format!(r#"{{"name": "{name}", "type": "{ty}"}}"#)).unwrap()
    }

    #[test]
    fn fixed_word_array_splits_on_commas() {
        let value = coerce_arg(&param("keys", "bytes32[]"), "a,b,c").unwrap();

        let DynSolValue::Array(elements) = value else {
            panic!("expected an array");
        };
        assert_eq!(elements.len(), 3);

        for (element, expected) in elements.iter().zip(["a", "b", "c"]) {
            assert_eq!(
                *element,
                DynSolValue::FixedBytes(encode_word(expected).unwrap(), 32)
            );
        }
    }

    #[test]
    fn fixed_word_scalar() {
        let value = coerce_arg(&param("key", "bytes32"), "mUSD").unwrap();
        assert_eq!(
            value,
            DynSolValue::FixedBytes(encode_word("mUSD").unwrap(), 32)
        );
    }

    #[test]
    fn uint_scalar() {
        let value = coerce_arg(&param("amount", "uint256"), "42").unwrap();
        assert_eq!(value, DynSolValue::Uint(U256::from(42), 256));
    }

    #[test]
    fn uint_array_trims_elements() {
        let value = coerce_arg(&param("amounts", "uint256[]"), "1, 2,3").unwrap();

        let DynSolValue::Array(elements) = value else {
            panic!("expected an array");
        };
        assert_eq!(
            elements,
            vec![
                DynSolValue::Uint(U256::from(1), 256),
                DynSolValue::Uint(U256::from(2), 256),
                DynSolValue::Uint(U256::from(3), 256),
            ]
        );
    }

    #[test]
    fn sized_array_becomes_a_fixed_array() {
        let value = coerce_arg(&param("pair", "uint256[2]"), "1,2").unwrap();

        let DynSolValue::FixedArray(elements) = value else {
            panic!("expected a fixed array");
        };
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn bool_and_address_scalars() {
        assert_eq!(
            coerce_arg(&param("flag", "bool"), "true").unwrap(),
            DynSolValue::Bool(true)
        );

        let value =
            coerce_arg(&param("to", "address"), "0x0000000000000000000000000000000000000001")
                .unwrap();
        assert!(matches!(value, DynSolValue::Address(_)));
    }

    #[test]
    fn invalid_input_is_an_error() {
        assert!(coerce_arg(&param("amount", "uint256"), "not a number").is_err());
        assert!(coerce_arg(&param("key", "bytes32"), &"x".repeat(33)).is_err());
    }
}
