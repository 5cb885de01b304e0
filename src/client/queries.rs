//! Fixed GraphQL query documents, one per call site

/// Blogs with their first page of articles (storefront surface)
pub fn blogs_query(blog_page_size: u32, article_page_size: u32) -> String {
    format!(
        r#"{{
  blogs(first: {blog_page_size}) {{
    edges {{
      node {{
        id
        handle
        title
        articles(first: {article_page_size}) {{
          edges {{
            node {{
              id
              handle
              title
              image {{
                url
                altText
              }}
              content
            }}
          }}
        }}
      }}
    }}
  }}
}}"#
    )
}

/// First page of metaobjects of one type with their key/value fields
pub fn metaobjects_query(metaobject_type: &str, page_size: u32) -> String {
    // A JSON string literal is also a valid GraphQL string literal
    let type_literal = serde_json::Value::String(metaobject_type.to_string()).to_string();
    format!(
        r#"{{
  metaobjects(type: {type_literal}, first: {page_size}) {{
    nodes {{
      id
      handle
      fields {{
        key
        value
      }}
    }}
  }}
}}"#
    )
}
