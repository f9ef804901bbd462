use crate::models::Tool;

const SPOTIFY_MARKER: &str = "spotify.com";

/// URL이 가리키는 다운로더를 고른다.
/// `spotify.com`이 어디에든 포함되면 spotdl, 그 외에는 모두 yt-dlp.
/// 쿼리 파라미터 안에 들어 있어도 spotdl로 보낸다.
pub fn route(url: &str) -> Tool {
    if url.contains(SPOTIFY_MARKER) {
        Tool::Spotdl
    } else {
        Tool::YtDlp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_spotify_track() {
        assert_eq!(
            route("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"),
            Tool::Spotdl
        );
    }

    #[test]
    fn test_route_spotify_marker_in_query() {
        assert_eq!(
            route("https://www.youtube.com/watch?v=abc&ref=spotify.com"),
            Tool::Spotdl
        );
    }

    #[test]
    fn test_route_youtube() {
        assert_eq!(route("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), Tool::YtDlp);
    }

    #[test]
    fn test_route_non_url_text() {
        assert_eq!(route("not a url"), Tool::YtDlp);
    }

    #[test]
    fn test_route_is_case_sensitive() {
        assert_eq!(route("https://open.SPOTIFY.COM/track/x"), Tool::YtDlp);
    }
}
