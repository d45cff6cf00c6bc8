//! Contract method descriptors.

use sha3::{Digest, Keccak256};

use super::codec::{decode, encode};
use super::error::AbiError;
use super::token::{ParamType, Token};

/// First four bytes of Keccak-256 over a method signature.
pub type Selector = [u8; 4];

/// A contract method: name plus input and output types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub inputs: Vec<ParamType>,
    pub outputs: Vec<ParamType>,
}

impl Function {
    pub fn new(name: &str, inputs: Vec<ParamType>, outputs: Vec<ParamType>) -> Self {
        Self {
            name: name.to_string(),
            inputs,
            outputs,
        }
    }

    /// Canonical signature, e.g. `updateProtocolFlatFee(uint256)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.inputs.iter().map(ToString::to_string).collect();
        format!("{}({})", self.name, params.join(","))
    }

    pub fn selector(&self) -> Selector {
        let digest = Keccak256::digest(self.signature().as_bytes());
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&digest[..4]);
        selector
    }

    /// Selector followed by the encoded arguments.
    pub fn encode_input(&self, args: &[Token]) -> Result<Vec<u8>, AbiError> {
        check_types(&self.inputs, args)?;
        let mut data = self.selector().to_vec();
        data.extend(encode(args));
        Ok(data)
    }

    /// Check the selector and decode the arguments of a call to this method.
    pub fn decode_input(&self, data: &[u8]) -> Result<Vec<Token>, AbiError> {
        if data.len() < 4 {
            return Err(AbiError::InvalidLength {
                expected: 4,
                got: data.len(),
            });
        }
        let selector = self.selector();
        if data[..4] != selector {
            return Err(AbiError::SelectorMismatch {
                expected: selector,
                got: data[..4].to_vec(),
            });
        }
        decode(&self.inputs, &data[4..])
    }

    pub fn encode_output(&self, values: &[Token]) -> Result<Vec<u8>, AbiError> {
        check_types(&self.outputs, values)?;
        Ok(encode(values))
    }

    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<Token>, AbiError> {
        decode(&self.outputs, data)
    }
}

fn check_types(expected: &[ParamType], values: &[Token]) -> Result<(), AbiError> {
    if expected.len() != values.len() {
        return Err(AbiError::ArgumentCount {
            expected: expected.len(),
            got: values.len(),
        });
    }
    for (index, (ty, value)) in expected.iter().zip(values).enumerate() {
        if value.param_type() != *ty {
            return Err(AbiError::TypeMismatch {
                index,
                expected: *ty,
                got: value.param_type(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fungible_admin_types::{ChainAddress, U256};

    fn transfer() -> Function {
        Function::new(
            "transfer",
            vec![ParamType::Address, ParamType::Uint],
            vec![ParamType::Bool],
        )
    }

    #[test]
    fn test_well_known_selectors() {
        assert_eq!(transfer().signature(), "transfer(address,uint256)");
        assert_eq!(transfer().selector(), [0xa9, 0x05, 0x9c, 0xbb]);

        let decimals = Function::new("decimals", vec![], vec![ParamType::Uint]);
        assert_eq!(decimals.selector(), [0x31, 0x3c, 0xe5, 0x67]);

        let symbol = Function::new("symbol", vec![], vec![ParamType::String]);
        assert_eq!(symbol.selector(), [0x95, 0xd8, 0x9b, 0x41]);
    }

    #[test]
    fn test_encode_input_prefixes_selector() {
        let to = ChainAddress::from_low_u64(1);
        let data = transfer()
            .encode_input(&[Token::Address(to), Token::Uint(U256::from(5u64))])
            .unwrap();
        assert_eq!(data.len(), 4 + 64);
        assert_eq!(&data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);

        let args = transfer().decode_input(&data).unwrap();
        assert_eq!(args[0], Token::Address(to));
        assert_eq!(args[1], Token::Uint(U256::from(5u64)));
    }

    #[test]
    fn test_encode_input_checks_signature() {
        assert_eq!(
            transfer().encode_input(&[Token::Uint(U256::one())]),
            Err(AbiError::ArgumentCount {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            transfer().encode_input(&[Token::Uint(U256::one()), Token::Uint(U256::one())]),
            Err(AbiError::TypeMismatch {
                index: 0,
                expected: ParamType::Address,
                got: ParamType::Uint,
            })
        );
    }

    #[test]
    fn test_decode_input_rejects_other_selector() {
        let decimals = Function::new("decimals", vec![], vec![ParamType::Uint]);
        let data = decimals.encode_input(&[]).unwrap();
        assert!(matches!(
            transfer().decode_input(&data),
            Err(AbiError::SelectorMismatch { .. })
        ));
        assert_eq!(
            transfer().decode_input(&[0xa9]),
            Err(AbiError::InvalidLength {
                expected: 4,
                got: 1
            })
        );
    }
}
