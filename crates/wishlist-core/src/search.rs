use crate::types::Movie;

/// Render the wishlist answer for `query` over `movies`.
///
/// Matching is a case-insensitive substring test on the title; an empty query
/// matches every movie. Matches keep the order of `movies`.
pub fn summarize(query: &str, movies: &[Movie]) -> String {
    let needle = query.to_lowercase();
    let sentences: Vec<String> = movies
        .iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .map(describe)
        .collect();

    if sentences.is_empty() {
        return format!("The movie '{query}' was not found in the wishlist.");
    }
    sentences.join(" ")
}

fn describe(movie: &Movie) -> String {
    let status = if movie.watched {
        "has been watched"
    } else {
        "has NOT been watched"
    };
    format!("'{}' is on the list and {status}.", movie.title)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, watched: bool) -> Movie {
        Movie {
            title: title.to_string(),
            watched,
        }
    }

    #[test]
    fn exact_match_unwatched() {
        let movies = [movie("The Matrix", false)];
        assert_eq!(
            summarize("Matrix", &movies),
            "'The Matrix' is on the list and has NOT been watched."
        );
    }

    #[test]
    fn no_match() {
        let movies = [movie("Inception", true)];
        assert_eq!(
            summarize("A Non-Existent Movie", &movies),
            "The movie 'A Non-Existent Movie' was not found in the wishlist."
        );
    }

    #[test]
    fn multiple_matches_keep_upstream_order() {
        let movies = [
            movie("Spider-Man", true),
            movie("Inception", false),
            movie("Spider-Man 2", false),
        ];
        assert_eq!(
            summarize("spider", &movies),
            "'Spider-Man' is on the list and has been watched. \
             'Spider-Man 2' is on the list and has NOT been watched."
        );
    }

    #[test]
    fn empty_query_matches_everything() {
        let movies = [movie("Alien", true), movie("Heat", false)];
        assert_eq!(
            summarize("", &movies),
            "'Alien' is on the list and has been watched. \
             'Heat' is on the list and has NOT been watched."
        );
    }

    #[test]
    fn empty_collection_is_not_found() {
        assert_eq!(
            summarize("", &[]),
            "The movie '' was not found in the wishlist."
        );
    }
}
