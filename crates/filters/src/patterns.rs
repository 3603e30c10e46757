//! glob 스타일 패턴 -> 앵커된 정규식 컴파일
//!
//! 두 가지 문법을 지원합니다.
//!
//! | 문법 | 알파벳 | `*` | `**` | 정규화 |
//! |------|--------|-----|------|--------|
//! | FQDN | `a-z 0-9 - .` | `[-.0-9a-z]*` | 없음 | 공백 제거, 끝 점 1개 제거, 소문자 |
//! | 노드명 | `a-z 0-9 - / .` | `[-0-9a-z]*` (레이블 일부) | 레이블 1개 이상 | 없음 |
//!
//! 패턴 목록은 입력 순서대로 `^(?:p1|p2|...)$` 형태의 단일 정규식으로 합쳐집니다.
//! 첫 번째로 잘못된 문자를 만나면 즉시 실패합니다.

use regex::Regex;

use crate::error::PatternError;

/// FQDN `*` 확장: 0개 이상의 도메인 문자 (점 포함)
const FQDN_STAR: &str = "[-.0-9a-z]*";
/// 노드명 `*` 확장: 레이블 하나의 일부 (점/슬래시 제외)
const NODE_NAME_STAR: &str = "[-0-9a-z]*";
/// 노드명 `**` 확장: 점으로 구분된 완전한 레이블 1개 이상 (슬래시 제외)
const NODE_NAME_DOUBLE_STAR: &str = r"(?:[-0-9a-z]+(?:\.(?:[-0-9a-z]+))*)";

/// FQDN 패턴을 정규화합니다.
///
/// 앞뒤 공백을 제거하고, 끝의 점을 최대 하나 제거한 뒤 소문자로 변환합니다.
/// 결과가 점으로 끝나지 않는 한 멱등입니다:
/// `canonicalize(canonicalize(p)) == canonicalize(p)`.
pub fn canonicalize_fqdn_pattern(pattern: &str) -> String {
    let pattern = pattern.trim();
    let pattern = pattern.strip_suffix('.').unwrap_or(pattern);
    // 문자 하나는 항상 문자 하나로 소문자화 (`İ` -> `i`)
    pattern
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// FQDN 패턴 목록과 동등한 정규식을 반환합니다.
///
/// # Errors
/// - [`PatternError::EmptyPattern`]: 정규화 후 빈 패턴
/// - [`PatternError::MultipleTrailingDots`]: 정규화 후에도 점으로 끝나는 패턴
/// - [`PatternError::InvalidPatternRune`]: 알파벳 밖의 문자
pub fn compile_fqdn_pattern<S: AsRef<str>>(patterns: &[S]) -> Result<Regex, PatternError> {
    compile_alternation(patterns, append_fqdn_pattern_regex)
}

/// 노드명 패턴 목록과 동등한 정규식을 반환합니다.
///
/// 노드명 패턴은 정규화하지 않고 주어진 그대로 매칭합니다.
///
/// # Errors
/// - [`PatternError::InvalidPatternByte`]: 알파벳 밖의 바이트
pub fn compile_node_name_pattern<S: AsRef<str>>(patterns: &[S]) -> Result<Regex, PatternError> {
    compile_alternation(patterns, append_node_name_pattern_regex)
}

/// 각 패턴의 정규식 조각을 `|`로 이어 붙이고 양 끝을 앵커링합니다.
fn compile_alternation<S, F>(patterns: &[S], append: F) -> Result<Regex, PatternError>
where
    S: AsRef<str>,
    F: Fn(&mut String, &str) -> Result<(), PatternError>,
{
    let mut re = String::from("^(?:");
    for (i, pattern) in patterns.iter().enumerate() {
        if i > 0 {
            re.push('|');
        }
        append(&mut re, pattern.as_ref())?;
    }
    re.push_str(")$");
    Ok(Regex::new(&re)?)
}

/// FQDN 패턴 하나의 정규식 조각을 `re`에 추가합니다.
fn append_fqdn_pattern_regex(re: &mut String, pattern: &str) -> Result<(), PatternError> {
    let pattern = canonicalize_fqdn_pattern(pattern);
    if pattern.is_empty() {
        return Err(PatternError::EmptyPattern);
    }
    if pattern.ends_with('.') {
        return Err(PatternError::MultipleTrailingDots);
    }

    for c in pattern.chars() {
        match c {
            '.' => re.push_str(r"\."),
            '*' => re.push_str(FQDN_STAR),
            '-' | '0'..='9' | 'a'..='z' => re.push(c),
            _ => return Err(PatternError::InvalidPatternRune(c)),
        }
    }
    Ok(())
}

/// 노드명 패턴 하나의 정규식 조각을 `re`에 추가합니다.
fn append_node_name_pattern_regex(re: &mut String, pattern: &str) -> Result<(), PatternError> {
    let mut bytes = pattern.bytes().peekable();
    while let Some(b) = bytes.next() {
        match b {
            b'.' => re.push_str(r"\."),
            b'*' => {
                if bytes.next_if_eq(&b'*').is_some() {
                    re.push_str(NODE_NAME_DOUBLE_STAR);
                } else {
                    re.push_str(NODE_NAME_STAR);
                }
            }
            b'-' | b'/' | b'0'..=b'9' | b'a'..=b'z' => re.push(char::from(b)),
            _ => return Err(PatternError::InvalidPatternByte(b)),
        }
    }
    Ok(())
}
