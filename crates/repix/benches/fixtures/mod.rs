macro_rules! input {
    ($name: literal) => {
        ($name, include_str!(concat!("./", $name)))
    };
}

pub const FIXTURES: [(&str, &str); 2] = [input!("gallery.html"), input!("article.html")];
