//! Recipes that ship with Graft.
//!
//! [`all_recipes`] is the single entry point used to seed the in-memory
//! store. Recipes are declared in code so the binary works without any files
//! on disk; user recipes are loaded from TOML by
//! [`crate::recipe_loader::RecipeLoader`].
//!
//! # `devise-tailwind`
//!
//! Sets up Devise authentication with Tailwind-styled views on a Rails 8
//! application created with importmap + Tailwind:
//!
//! 1. adds `devise` plus `bullet`, `traceroute`, `better_errors` and
//!    `binding_of_caller` in the development group
//! 2. installs Devise and generates the model (asked, default `User`)
//! 3. optionally adds extra columns through a migration and migrates
//! 4. generates Devise views and merges custom ones from `lib/templates/devise`
//! 5. installs Bullet and writes `.traceroute.yaml`
//! 6. copies nav/flash partials from `lib/shared` into `app/views/layouts/shared`
//!    and renders them from the application layout
//! 7. generates the `flash` Stimulus controller and replaces its body
//! 8. permits `username` in Devise strong parameters, adds `Current.user`
//! 9. adds a turbo-stream flash helper and copies `lib/tailwind`
//!
//! `CopyDirectory` sources are resolved against the recipe's asset root
//! (`--assets`, defaulting to the project root).

use graft_core::{
    domain::{Directive, DomainError, InjectPosition, Recipe},
    error::GraftResult,
};

/// Name of the built-in Devise + Tailwind recipe.
pub const DEVISE_TAILWIND: &str = "devise-tailwind";

/// Every built-in recipe, validated.
pub fn all_recipes() -> GraftResult<Vec<Recipe>> {
    Ok(vec![devise_tailwind()?])
}

const TRACEROUTE_YAML: &str = r"ignore_unreachable_actions:
  - ^active_storage\/
  - ^devise\/
ignore_unused_routes:
  # - ^users#index
  - ^active_storage\/
  - ^rails/health#show
  - ^devise\/
";

const LAYOUT_HEADER: &str = r#"<header class="sticky top-0 h-20">
  <%= render 'layouts/shared/nav' %>
  <div id="flashes">
    <%= render 'layouts/shared/flash_messages' %>
  </div>
</header>
"#;

const FLASH_CONTROLLER_JS: &str = r#"import { Controller } from "@hotwired/stimulus"

// Connects to data-controller="flash"
export default class extends Controller {
  static targets = ["alert"]
  connect() {
    console.log("Flash Connected")

    setTimeout(() => {
        this.alertTarget.classList.add("animate-pulse", "ease-in-out")
    }, 3000)

    setTimeout(() => {
      this.alertTarget.classList.add("transform", "scale-75", "transition-all", "duration-300")
    },4500)

    setTimeout(() => {
      this.alertTarget.remove()
    }, 5000)
  }
}

"#;

const STRONG_PARAMETERS: &str = "before_action :configure_permitted_parameters, if: :devise_controller?

protected

def configure_permitted_parameters
  devise_parameter_sanitizer.permit(:sign_up, keys: [ :username, :email ])
  devise_parameter_sanitizer.permit(:account_update, keys: [ :username, :email ])
  devise_parameter_sanitizer.permit(:sign_in, keys: [ :username ])
end
";

const CURRENT_MODEL: &str = "class Current < ActiveSupport::CurrentAttributes
  attribute :user
end
";

const SET_CURRENT_USER: &str = "private

def set_current_user
  Current.user = current_user
end
";

const FLASH_HELPER: &str = r#"def render_turbo_stream_flash_messages
  turbo_stream.prepend "flashes", partial: "layouts/shared/flash_messages"
end
"#;

const APPLICATION_CONTROLLER: &str = "app/controllers/application_controller.rb";

/// Devise authentication with Tailwind views, nav/flash partials and a
/// `Current.user` attribute.
pub fn devise_tailwind() -> Result<Recipe, DomainError> {
    Recipe::builder(DEVISE_TAILWIND)
        .description("Devise authentication with Tailwind views, flash messages and Current.user")
        // Gems
        .directive(Directive::install("devise"))
        .directives(
            ["bullet", "traceroute", "better_errors", "binding_of_caller"]
                .into_iter()
                .map(|gem| Directive::install_in_group(gem, "development")),
        )
        // Devise model
        .directive(Directive::generate("devise:install", Vec::<String>::new()))
        .directive(Directive::ask(
            "model",
            "What would you like to name your Devise model?",
            Some("User"),
        ))
        .directive(Directive::generate("devise", ["{{model}}"]))
        .directive(Directive::ask(
            "extra_columns",
            "Add extra columns to {{model}} (comma-separated, e.g., username:string)?",
            None,
        ))
        .directive(Directive::when_answered(
            "extra_columns",
            vec![
                Directive::generate(
                    "migration",
                    ["AddExtraColumnsTo{{model_plural}}", "{{extra_columns}}"],
                ),
                Directive::task("db:migrate"),
            ],
        ))
        // Views
        .directive(Directive::generate("devise:views", Vec::<String>::new()))
        .directive(Directive::say("Copying custom Devise views..."))
        .directive(Directive::copy_directory(
            "lib/templates/devise",
            "app/views/devise",
            true,
        ))
        // Bullet + traceroute
        .directive(Directive::say("✅ Running Bullet installer..."))
        .directive(Directive::generate("bullet:install", Vec::<String>::new()))
        .directive(Directive::create_file(".traceroute.yaml", TRACEROUTE_YAML, false))
        .directive(Directive::say(
            "✅ .traceroute.yaml created with default settings",
        ))
        // Nav & flash partials
        .directive(Directive::ensure_directory("app/views/layouts/shared"))
        .directive(Directive::say("----- Copying shared folder files -----"))
        .directive(Directive::copy_directory(
            "lib/shared",
            "app/views/layouts/shared",
            true,
        ))
        .directive(Directive::inject(
            "app/views/layouts/application.html.erb",
            "<body>\n",
            InjectPosition::After,
            LAYOUT_HEADER,
        ))
        // Stimulus flash controller
        .directive(Directive::say(
            "--- Generating stimulus controller for flash ----",
        ))
        .directive(Directive::generate("stimulus", ["flash"]))
        .directive(Directive::create_file(
            "app/javascript/controllers/flash_controller.js",
            FLASH_CONTROLLER_JS,
            true,
        ))
        .directive(Directive::say(
            "✅  flash_controller.js created with flash message animations",
        ))
        // Strong parameters + Current.user
        .directive(Directive::inject(
            APPLICATION_CONTROLLER,
            "stale_when_importmap_changes\n",
            InjectPosition::After,
            STRONG_PARAMETERS,
        ))
        .directive(Directive::create_file("app/models/current.rb", CURRENT_MODEL, false))
        .directive(Directive::inject(
            APPLICATION_CONTROLLER,
            "before_action :configure_permitted_parameters, if: :devise_controller?\n",
            InjectPosition::After,
            "before_action :set_current_user, if: :user_signed_in?\n",
        ))
        .directive(Directive::inject(
            APPLICATION_CONTROLLER,
            "protected\n",
            InjectPosition::Before,
            SET_CURRENT_USER,
        ))
        // Turbo flash helper
        .directive(Directive::say("---- Adding turbo flash messages helper ----"))
        .directive(Directive::inject(
            "app/helpers/application_helper.rb",
            "module ApplicationHelper\n",
            InjectPosition::After,
            FLASH_HELPER,
        ))
        // Tailwind classes
        .directive(Directive::say("--- Copy tailwind custom classes ---"))
        .directive(Directive::copy_directory(
            "lib/tailwind",
            "app/assets/tailwind",
            true,
        ))
        // Closing instructions
        .directives(
            [
                "✅ Devise setup complete!",
                "⚠️ Read the below instructions carefully!",
                "======================================",
                "Uncomment or Add the following to devise initializer",
                "if you want to use eg: username for authentication",
                "",
                "1️⃣  config.authentication_keys = [ :username ]",
                "2️⃣  config.case_insensitive_keys = [ :email, :username ]",
                "3️⃣  config.strip_whitespace_keys = [ :email, :username ]",
                "",
                "======================================",
            ]
            .into_iter()
            .map(Directive::say),
        )
        .build()
}
