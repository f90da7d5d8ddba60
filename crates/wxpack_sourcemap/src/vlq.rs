const BASE64_CHARS: &[u8; 64] =
  b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Appends the base64 VLQ encoding of `value` (source map v3 mappings).
pub fn encode(value: i64, out: &mut String) {
  #[allow(clippy::cast_sign_loss)]
  let mut rest =
    if value < 0 { ((value.unsigned_abs()) << 1) | 1 } else { (value as u64) << 1 };
  loop {
    let mut digit = (rest & 31) as u8;
    rest >>= 5;
    if rest != 0 {
      digit |= 32;
    }
    out.push(char::from(BASE64_CHARS[digit as usize]));
    if rest == 0 {
      break;
    }
  }
}

#[test]
fn test_encode() {
  let mut out = String::new();
  encode(0, &mut out);
  encode(1, &mut out);
  encode(-1, &mut out);
  encode(16, &mut out);
  encode(-17, &mut out);
  assert_eq!(out, "ACDgBjB");
}
