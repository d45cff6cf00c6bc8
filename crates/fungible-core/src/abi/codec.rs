//! Head/tail word encoding shared by call inputs and outputs.

use fungible_admin_types::{ChainAddress, U256, ADDRESS_LENGTH};

use super::error::AbiError;
use super::token::{ParamType, Token};

/// Size of one ABI word in bytes.
pub const WORD_SIZE: usize = 32;

const ADDRESS_PADDING: usize = WORD_SIZE - ADDRESS_LENGTH;

/// Encode a sequence of values (no selector).
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_size = tokens.len() * WORD_SIZE;
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            Token::Uint(value) => head.extend_from_slice(&uint_word(*value)),
            Token::Address(address) => {
                let mut word = [0u8; WORD_SIZE];
                word[ADDRESS_PADDING..].copy_from_slice(address.as_bytes());
                head.extend_from_slice(&word);
            }
            Token::Bool(flag) => head.extend_from_slice(&uint_word(U256::from(*flag as u8))),
            Token::String(s) => {
                head.extend_from_slice(&uint_word(U256::from(head_size + tail.len())));
                tail.extend_from_slice(&uint_word(U256::from(s.len())));
                tail.extend_from_slice(s.as_bytes());
                tail.resize(round_up(tail.len()), 0);
            }
        }
    }

    head.extend(tail);
    head
}

/// Decode `data` as a sequence of values of the given types (no selector).
///
/// The data must be exactly as long as the layout requires; short, trailing
/// or misaligned bytes are rejected.
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    let head_size = types.len() * WORD_SIZE;
    if data.len() < head_size {
        return Err(AbiError::InvalidLength {
            expected: head_size,
            got: data.len(),
        });
    }

    let mut expected_len = head_size;
    let mut tokens = Vec::with_capacity(types.len());

    for (index, ty) in types.iter().enumerate() {
        let word = &data[index * WORD_SIZE..(index + 1) * WORD_SIZE];
        let token = match ty {
            ParamType::Uint => Token::Uint(U256::from_big_endian(word)),
            ParamType::Address => {
                if word[..ADDRESS_PADDING].iter().any(|b| *b != 0) {
                    return Err(AbiError::InvalidAddress { index });
                }
                let mut bytes = [0u8; ADDRESS_LENGTH];
                bytes.copy_from_slice(&word[ADDRESS_PADDING..]);
                Token::Address(ChainAddress::from_bytes(bytes))
            }
            ParamType::Bool => {
                let value = U256::from_big_endian(word);
                if value.is_zero() {
                    Token::Bool(false)
                } else if value == U256::one() {
                    Token::Bool(true)
                } else {
                    return Err(AbiError::InvalidBool { index });
                }
            }
            ParamType::String => {
                let (s, end) = decode_string_tail(data, word, head_size, index)?;
                expected_len = expected_len.max(round_up(end));
                Token::String(s)
            }
        };
        tokens.push(token);
    }

    if data.len() != expected_len {
        return Err(AbiError::InvalidLength {
            expected: expected_len,
            got: data.len(),
        });
    }
    Ok(tokens)
}

fn decode_string_tail(
    data: &[u8],
    offset_word: &[u8],
    head_size: usize,
    index: usize,
) -> Result<(String, usize), AbiError> {
    let bad_offset = AbiError::InvalidOffset { index };

    let offset = word_to_usize(offset_word).ok_or_else(|| bad_offset.clone())?;
    if offset < head_size || offset % WORD_SIZE != 0 {
        return Err(bad_offset);
    }
    let len_end = offset
        .checked_add(WORD_SIZE)
        .filter(|end| *end <= data.len())
        .ok_or_else(|| bad_offset.clone())?;
    let len = word_to_usize(&data[offset..len_end]).ok_or_else(|| bad_offset.clone())?;
    let end = len_end
        .checked_add(len)
        .filter(|end| *end <= data.len())
        .ok_or(bad_offset)?;

    let s = std::str::from_utf8(&data[len_end..end])
        .map_err(|_| AbiError::InvalidUtf8 { index })?
        .to_string();
    Ok((s, end))
}

fn uint_word(value: U256) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    value.to_big_endian(&mut word);
    word
}

fn word_to_usize(word: &[u8]) -> Option<usize> {
    let value = U256::from_big_endian(word);
    if value > U256::from(usize::MAX) {
        None
    } else {
        Some(value.as_usize())
    }
}

fn round_up(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}
